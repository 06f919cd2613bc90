//! Hydration: raw parse tree ⇄ live document model
//!
//! `hydrate` fills every gap the text leaves (ids, titles, positions, a
//! default chapter and paragraph) so the live model is always complete.
//! `dehydrate` goes the other way for serialization, rebuilding each node's
//! metadata record from its live fields.

use crate::markdown::{Heading, RawChapter, RawDocument, RawParagraph};
use doc_model::{
    current_timestamp, Chapter, ChapterMetadata, Document, DocumentMetadata, NodeId, NodeKind,
    Paragraph, ParagraphMetadata, DEFAULT_DOCUMENT_TITLE, DEFAULT_HEADING_LEVEL,
    DEFAULT_PARAGRAPH_KIND,
};
use std::path::Path;

/// Defaults used while hydrating
#[derive(Debug, Clone)]
pub struct HydrateOptions {
    /// Title when neither the path nor metadata supplies one
    pub fallback_title: String,
    /// Base title of synthesized chapters (`"Chapter"` → `"Chapter 1"`)
    pub chapter_title: String,
    pub heading_level: u8,
}

impl Default for HydrateOptions {
    fn default() -> Self {
        Self {
            fallback_title: DEFAULT_DOCUMENT_TITLE.to_string(),
            chapter_title: "Chapter".to_string(),
            heading_level: DEFAULT_HEADING_LEVEL,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// File stem of a storage path, e.g. `notes` for `/drafts/notes.md`
pub fn title_from_path(path: &str) -> Option<String> {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.trim().is_empty())
        .map(str::to_string)
}

/// Hydrate with default options
pub fn hydrate(raw: RawDocument, path: &str) -> Document {
    hydrate_with(raw, path, &HydrateOptions::default())
}

pub fn hydrate_with(raw: RawDocument, path: &str, options: &HydrateOptions) -> Document {
    let RawDocument {
        id,
        metadata,
        preface,
        chapters,
    } = raw;

    let mut chapters: Vec<Chapter> = chapters
        .into_iter()
        .enumerate()
        .map(|(index, chapter)| hydrate_chapter(chapter, index, options))
        .collect();
    if chapters.is_empty() {
        chapters.push(hydrate_chapter(default_chapter(options), 0, options));
    }

    let DocumentMetadata {
        id: metadata_id,
        title,
        info_text,
        annotations,
        version,
        updated_at,
    } = metadata;

    let mut document = Document {
        path: path.to_string(),
        id: metadata_id
            .or(id)
            .unwrap_or_else(|| NodeId::generate(NodeKind::Document)),
        metadata: DocumentMetadata::default(),
        title: title_from_path(path)
            .or_else(|| non_blank(title))
            .unwrap_or_else(|| options.fallback_title.clone()),
        info_text: info_text.unwrap_or_default(),
        annotations,
        version: version.unwrap_or(1),
        updated_at: non_blank(updated_at).unwrap_or_else(current_timestamp),
        preface,
        chapters,
    };
    fold_metadata(&mut document);
    document
}

fn default_chapter(options: &HydrateOptions) -> RawChapter {
    let title = format!("{} 1", options.chapter_title);
    RawChapter {
        metadata: ChapterMetadata::titled(title.clone()),
        heading: Heading {
            level: options.heading_level,
            text: title,
        },
        ..Default::default()
    }
}

fn hydrate_chapter(raw: RawChapter, index: usize, options: &HydrateOptions) -> Chapter {
    let RawChapter {
        id,
        metadata,
        heading,
        leading,
        paragraphs,
    } = raw;
    let ChapterMetadata {
        id: metadata_id,
        title,
        annotations,
    } = metadata;

    let id = metadata_id
        .or(id)
        .unwrap_or_else(|| NodeId::generate(NodeKind::Chapter));
    let title = non_blank(title);
    let heading_text = non_blank(Some(heading.text))
        .or_else(|| title.clone())
        .unwrap_or_else(|| format!("{} {}", options.chapter_title, index + 1));
    let title = title.unwrap_or_else(|| heading_text.clone());

    let mut paragraphs: Vec<Paragraph> = paragraphs
        .into_iter()
        .map(|paragraph| hydrate_paragraph(paragraph, &id))
        .collect();
    if paragraphs.is_empty() {
        paragraphs.push(Paragraph::new(id.clone()));
    }

    Chapter {
        metadata: ChapterMetadata::default(),
        id,
        title,
        position: index,
        heading_level: heading.level.clamp(1, 6),
        heading_text,
        leading,
        annotations,
        paragraphs,
    }
}

fn hydrate_paragraph(raw: RawParagraph, chapter_id: &NodeId) -> Paragraph {
    let RawParagraph {
        id,
        metadata,
        leading,
        text,
        trailing,
        ..
    } = raw;

    let id = metadata
        .id
        .clone()
        .or(id)
        .unwrap_or_else(|| NodeId::generate(NodeKind::Paragraph));
    let kind = non_blank(metadata.kind.clone()).unwrap_or_else(|| DEFAULT_PARAGRAPH_KIND.to_string());

    Paragraph {
        id,
        chapter_id: chapter_id.clone(),
        annotations: metadata.annotations.clone(),
        metadata,
        text,
        leading,
        trailing,
        kind,
    }
}

/// Rebuild every node's metadata record from its live fields.
///
/// Also restores positions and paragraph back-references, so any in-place
/// edit of the model is made consistent by one call.
pub fn fold_metadata(document: &mut Document) {
    document.renumber_chapters();
    document.metadata = document_metadata(document);
    for chapter in &mut document.chapters {
        chapter.metadata = chapter_metadata(chapter);
        for paragraph in &mut chapter.paragraphs {
            paragraph.chapter_id = chapter.id.clone();
            paragraph.metadata = paragraph_metadata(paragraph);
        }
    }
}

/// Bump `updated_at` and fold metadata. The version is left alone.
pub fn sync(document: &mut Document) {
    document.updated_at = current_timestamp();
    fold_metadata(document);
}

fn document_metadata(document: &Document) -> DocumentMetadata {
    DocumentMetadata {
        id: Some(document.id.clone()),
        title: Some(document.title.clone()),
        info_text: Some(document.info_text.clone()),
        annotations: document.annotations.clone(),
        version: Some(document.version),
        updated_at: Some(document.updated_at.clone()),
    }
}

fn chapter_metadata(chapter: &Chapter) -> ChapterMetadata {
    ChapterMetadata {
        id: Some(chapter.id.clone()),
        title: Some(chapter.title.clone()),
        annotations: chapter.annotations.clone(),
    }
}

fn paragraph_metadata(paragraph: &Paragraph) -> ParagraphMetadata {
    ParagraphMetadata {
        id: Some(paragraph.id.clone()),
        kind: Some(paragraph.kind.clone()),
        annotations: paragraph.annotations.clone(),
        title: paragraph.metadata.title.clone(),
    }
}

/// Convert a live document back into a raw tree
pub fn dehydrate(document: &Document) -> RawDocument {
    RawDocument {
        id: Some(document.id.clone()),
        metadata: document_metadata(document),
        preface: document.preface.clone(),
        chapters: document
            .chapters
            .iter()
            .map(|chapter| RawChapter {
                id: Some(chapter.id.clone()),
                metadata: chapter_metadata(chapter),
                heading: Heading {
                    level: chapter.heading_level,
                    text: chapter.heading_text.clone(),
                },
                leading: chapter.leading.clone(),
                paragraphs: chapter
                    .paragraphs
                    .iter()
                    .map(|paragraph| RawParagraph {
                        id: Some(paragraph.id.clone()),
                        metadata: paragraph_metadata(paragraph),
                        leading: paragraph.leading.clone(),
                        text: paragraph.text.clone(),
                        trailing: paragraph.trailing.clone(),
                        has_metadata: true,
                    })
                    .collect(),
            })
            .collect(),
    }
}
