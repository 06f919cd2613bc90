mod common;

use common::*;
use doc_model::NodeId;
use doc_store::markdown::{parse_markdown, serialize_markdown};
use doc_store::{dehydrate, hydrate, NewParagraph};

#[test]
fn test_structural_completion_of_empty_text() {
    let document = hydrate(parse_markdown("").document, "/empty.md");
    assert_eq!(document.chapters.len(), 1);
    assert_eq!(document.chapters[0].paragraphs.len(), 1);
    assert!(document.id.as_str().starts_with("doc-"));
}

#[test]
fn test_metadata_pruning() {
    let mut raw = parse_markdown("").document;
    raw.chapters.push(doc_store::markdown::RawChapter {
        id: Some(NodeId::from("x")),
        metadata: doc_model::ChapterMetadata {
            id: Some(NodeId::from("x")),
            title: Some(String::new()),
            ..Default::default()
        },
        heading: doc_store::markdown::Heading { level: 2, text: "H".into() },
        ..Default::default()
    });
    let text = serialize_markdown(&raw);
    assert!(text.contains("<!-- {\"achiles-ide-chapter\":{\"id\":\"x\"}} -->\n## H\n"));
}

#[test]
fn test_scenario_a_plain_heading_after_document_marker() {
    let text = format!("{}# Intro\nhello\n", doc_marker("d1"));
    let report = parse_markdown(&text);
    let raw = report.document;

    assert_eq!(raw.id, Some(NodeId::from("d1")));
    assert_eq!(raw.preface, "");
    assert_eq!(raw.chapters.len(), 1);
    assert_eq!(raw.chapters[0].heading.text, "Intro");
    assert_eq!(raw.chapters[0].heading.level, 1);
    assert_eq!(raw.chapters[0].paragraphs.len(), 1);

    let paragraph = &raw.chapters[0].paragraphs[0];
    assert_eq!(paragraph.text, "hello");
    assert!(!paragraph.has_metadata);
    assert!(paragraph.id.is_none());
    assert!(!report.warnings.iter().any(|w| w.kind == doc_store::markdown::WarningKind::MalformedMetadata));
}

#[tokio::test]
async fn test_scenario_b_clamped_paragraph_insert() {
    let book = two_chapter_book();
    let mut registry = registry_with(&[("/book.md", book.as_str())]);
    registry.load("/book.md").await.unwrap();

    let chapter_id = NodeId::from("c1");
    let added = registry
        .add_paragraph(&chapter_id, NewParagraph::text("brand new"), Some(5))
        .await
        .unwrap();

    let chapter = registry.get_chapter(&chapter_id).unwrap();
    assert_eq!(chapter.paragraphs.len(), 3);
    assert_eq!(chapter.paragraphs[2].id, added.id);

    let saved = registry.backend().file("/book.md").unwrap();
    let marker = format!(
        "<!-- {{\"achiles-ide-paragraph\":{{\"id\":\"{}\",\"type\":\"markdown\"}}}} -->\nbrand new\n",
        added.id
    );
    let at = saved.find(&marker).expect("new paragraph marker precedes its text");
    assert!(saved.find("second").unwrap() < at);
    assert!(at < saved.find("## Two").unwrap());
}

#[tokio::test]
async fn test_scenario_c_restore_recreates_deleted_chapter() {
    let book = two_chapter_book();
    let mut registry = registry_with(&[("/book.md", book.as_str())]);
    registry.load("/book.md").await.unwrap();

    let snapshot = registry.add_snapshot("/book.md", None).await.unwrap();
    registry
        .delete_chapter("/book.md", &NodeId::from("c2"))
        .await
        .unwrap();
    assert!(registry.get_chapter(&NodeId::from("c2")).is_err());
    assert!(registry.get_paragraph(&NodeId::from("p3")).is_err());

    let restored = registry.restore_snapshot("/book.md", &snapshot.id).await.unwrap();
    let chapter = restored.chapter(&NodeId::from("c2")).unwrap();
    let ids: Vec<&str> = chapter.paragraphs.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p3", "p4"]);
    assert_eq!(chapter.position, 1);

    assert!(registry.get_paragraph(&NodeId::from("p4")).is_ok());
    assert!(registry.backend().file("/book.md").unwrap().contains("## Two"));
}

#[tokio::test]
async fn test_scenario_d_duplicate_ids_resolve_to_first_match() {
    let text = [
        doc_marker("d"),
        chapter_marker("c"),
        "## Dupes\n".to_string(),
        paragraph_marker("same"),
        "first\n".to_string(),
        paragraph_marker("same"),
        "second\n".to_string(),
    ]
    .concat();

    let raw = parse_markdown(&text).document;
    assert_eq!(raw.paragraph_count(), 2);

    let mut registry = registry_with(&[("/dupes.md", text.as_str())]);
    registry.load("/dupes.md").await.unwrap();

    let paragraph = registry.get_paragraph(&NodeId::from("same")).unwrap();
    assert_eq!(paragraph.text, "first");
}

#[test]
fn test_round_trip_keeps_structure_of_marked_document() {
    let book = two_chapter_book();
    let first = hydrate(parse_markdown(&book).document, "/book.md");
    let second = hydrate(parse_markdown(&serialize_markdown(&dehydrate(&first))).document, "/book.md");
    let third = hydrate(parse_markdown(&serialize_markdown(&dehydrate(&second))).document, "/book.md");

    assert_eq!(second, third);
    assert_eq!(second.preface, "Preface");
    let ids: Vec<&str> = second
        .chapters
        .iter()
        .flat_map(|c| c.paragraphs.iter().map(|p| p.id.as_str()))
        .collect();
    assert_eq!(ids, vec!["p1", "p2", "p3", "p4"]);
}
