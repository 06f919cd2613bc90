//! Text → raw tree
//!
//! The document is partitioned by its marker comments: the first document
//! marker supplies document metadata, each chapter marker opens a block that
//! runs to the next one, and paragraph markers split a chapter's body after
//! its heading line. Text with no chapter markers at all is split at its
//! heading lines instead.

use super::api::{ParseWarning, WarningKind};
use super::entities::{decode_entities, normalize_line_endings};
use super::raw::{Heading, RawChapter, RawDocument, RawParagraph};
use super::schema;
use super::scanner::{scan, strip_markers, MarkerComment, MarkerTag};
use doc_model::{ChapterMetadata, ParagraphMetadata};
use regex_lite::Regex;
use std::sync::OnceLock;

/// Heading text for a chapter block that has no heading line
pub const UNTITLED_CHAPTER_HEADING: &str = "Chapter";

fn heading_pattern() -> Option<&'static Regex> {
    static HEADING: OnceLock<Option<Regex>> = OnceLock::new();
    HEADING
        .get_or_init(|| Regex::new(r"^(#{1,6})\s+(.*)$").ok())
        .as_ref()
}

/// Recognize an ATX heading line (surrounding whitespace ignored)
pub fn parse_heading_line(line: &str) -> Option<Heading> {
    let captures = heading_pattern()?.captures(line.trim())?;
    let level = captures.get(1)?.as_str().len() as u8;
    let text = captures.get(2).map_or("", |m| m.as_str());
    Some(Heading {
        level,
        text: decode_entities(text.trim()),
    })
}

pub fn parse_document(markdown: &str, warnings: &mut Vec<ParseWarning>) -> RawDocument {
    let text = normalize_line_endings(markdown);
    let markers = scan(&text);

    let mut document_markers = markers.iter().filter(|m| m.tag == MarkerTag::Document);
    let document_marker = document_markers.next();
    for extra in document_markers {
        warnings.push(ParseWarning::new(
            WarningKind::DuplicateDocumentMarker,
            format!("ignored document marker at byte {}", extra.start),
        ));
    }

    let metadata = document_marker
        .map(|m| schema::decode_document(&m.payload, warnings))
        .unwrap_or_default();
    let body_start = document_marker.map_or(0, |m| m.end);

    let chapter_markers: Vec<&MarkerComment> = markers
        .iter()
        .filter(|m| m.tag == MarkerTag::Chapter)
        .collect();

    let (preface, chapters) = if chapter_markers.is_empty() {
        split_at_headings(&text[body_start..], warnings)
    } else {
        let preface = preface_between(&text, body_start, chapter_markers[0].start);
        let chapters = chapter_markers
            .iter()
            .enumerate()
            .map(|(i, marker)| {
                let end = chapter_markers.get(i + 1).map_or(text.len(), |next| next.start);
                let metadata = schema::decode_chapter(&marker.payload, warnings);
                parse_chapter_block(metadata, &text[marker.end..end], warnings)
            })
            .collect();
        (preface, chapters)
    };

    RawDocument {
        id: metadata.id.clone(),
        metadata,
        preface,
        chapters,
    }
}

fn preface_between(text: &str, start: usize, end: usize) -> String {
    if start >= end {
        return String::new();
    }
    decode_entities(strip_markers(&text[start..end]).trim())
}

/// Split a document without chapter markers at its heading lines
fn split_at_headings(body: &str, warnings: &mut Vec<ParseWarning>) -> (String, Vec<RawChapter>) {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if parse_heading_line(line).is_some() {
            starts.push(offset);
        }
        offset += line.len();
    }

    let Some(&first) = starts.first() else {
        return (preface_between(body, 0, body.len()), Vec::new());
    };

    let preface = preface_between(body, 0, first);
    let chapters = starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(body.len());
            parse_chapter_block(ChapterMetadata::default(), &body[start..end], warnings)
        })
        .collect();
    (preface, chapters)
}

/// Parse the text following a chapter marker up to the next one
pub fn parse_chapter_block(
    mut metadata: ChapterMetadata,
    block: &str,
    warnings: &mut Vec<ParseWarning>,
) -> RawChapter {
    let lines: Vec<&str> = block.split('\n').collect();
    let heading_at = lines
        .iter()
        .position(|line| parse_heading_line(line).is_some());

    let (mut heading, leading, paragraphs) = match heading_at {
        Some(index) => {
            let heading = parse_heading_line(lines[index]).unwrap_or_default();
            let leading = decode_entities(lines[..index].join("\n").trim());
            let remainder = lines[index + 1..].join("\n");
            (heading, leading, parse_paragraphs(&remainder, warnings))
        }
        None => (Heading::default(), String::new(), parse_paragraphs(block, warnings)),
    };

    if heading.text.is_empty() {
        heading.text = UNTITLED_CHAPTER_HEADING.to_string();
    }
    if metadata.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
        metadata.title = Some(heading.text.clone());
    }

    RawChapter {
        id: metadata.id.clone(),
        metadata,
        heading,
        leading,
        paragraphs,
    }
}

/// Split a chapter body into paragraphs at its paragraph markers
pub fn parse_paragraphs(content: &str, warnings: &mut Vec<ParseWarning>) -> Vec<RawParagraph> {
    let markers: Vec<MarkerComment> = scan(content)
        .into_iter()
        .filter(|m| m.tag == MarkerTag::Paragraph)
        .collect();

    let Some(first) = markers.first() else {
        return unmarked_paragraph(content).into_iter().collect();
    };

    let mut paragraphs = Vec::with_capacity(markers.len() + 1);
    if let Some(paragraph) = unmarked_paragraph(&content[..first.start]) {
        warnings.push(ParseWarning::new(
            WarningKind::UnmarkedContent,
            "text before the first paragraph marker kept as its own paragraph",
        ));
        paragraphs.push(paragraph);
    }

    for (i, marker) in markers.iter().enumerate() {
        let end = markers.get(i + 1).map_or(content.len(), |next| next.start);
        let segment = &content[marker.end..end];
        let segment = segment.strip_prefix('\n').unwrap_or(segment);
        let metadata = schema::decode_paragraph(&marker.payload, warnings);
        let (leading, text, trailing) = split_spacing(segment);

        paragraphs.push(RawParagraph {
            id: metadata.id.clone(),
            metadata,
            leading: decode_entities(leading),
            text: decode_entities(text),
            trailing: decode_entities(trailing),
            has_metadata: true,
        });
    }
    paragraphs
}

fn unmarked_paragraph(content: &str) -> Option<RawParagraph> {
    let (leading, text, trailing) = split_spacing(content);
    if text.is_empty() {
        return None;
    }
    Some(RawParagraph {
        id: None,
        metadata: ParagraphMetadata::default(),
        leading: decode_entities(leading),
        text: decode_entities(text),
        trailing: decode_entities(trailing),
        has_metadata: false,
    })
}

/// Split a segment into leading whitespace, text and trailing whitespace.
///
/// A whitespace-only segment is all leading.
pub fn split_spacing(segment: &str) -> (&str, &str, &str) {
    let text_start = segment.len() - segment.trim_start().len();
    if text_start == segment.len() {
        return (segment, "", "");
    }
    let text_end = segment.trim_end().len();
    (
        &segment[..text_start],
        &segment[text_start..text_end],
        &segment[text_end..],
    )
}
