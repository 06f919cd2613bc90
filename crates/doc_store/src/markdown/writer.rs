//! Raw tree → text

use super::entities::decode_for_save;
use super::raw::{RawChapter, RawDocument, RawParagraph};
use super::scanner::MarkerTag;
use super::schema;
use serde::Serialize;
use serde_json::{Map, Value};

/// Options controlling serialization
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Longest run of newlines left in the output
    pub max_consecutive_newlines: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            max_consecutive_newlines: 3,
        }
    }
}

pub fn write_document(document: &RawDocument, options: &WriteOptions) -> String {
    let mut output = String::new();

    let mut metadata = document.metadata.clone();
    if metadata.id.is_none() {
        metadata.id = document.id.clone();
    }
    push_marker(&mut output, MarkerTag::Document, &metadata);

    let preface = decode_for_save(&document.preface);
    let preface = preface.trim();
    if !preface.is_empty() {
        output.push_str(preface);
        output.push_str("\n\n");
    }

    for (index, chapter) in document.chapters.iter().enumerate() {
        if index > 0 && !output.ends_with("\n\n") {
            output.push('\n');
        }
        write_chapter(&mut output, chapter, index);
    }

    collapse_newlines(&output, options.max_consecutive_newlines)
}

fn write_chapter(output: &mut String, chapter: &RawChapter, index: usize) {
    let mut metadata = chapter.metadata.clone();
    if metadata.id.is_none() {
        metadata.id = chapter.id.clone();
    }
    push_marker(output, MarkerTag::Chapter, &metadata);

    let leading = decode_for_save(&chapter.leading);
    let leading = leading.trim();
    if !leading.is_empty() {
        output.push_str(leading);
        output.push('\n');
    }

    let level = chapter.heading.level.clamp(1, 6) as usize;
    let text = heading_text(chapter, index);
    output.push_str(&"#".repeat(level));
    output.push(' ');
    output.push_str(&text);
    output.push('\n');

    for paragraph in &chapter.paragraphs {
        write_paragraph(output, paragraph);
    }
}

fn heading_text(chapter: &RawChapter, index: usize) -> String {
    let decoded = decode_for_save(chapter.heading.text.trim());
    let text = if !decoded.is_empty() {
        decoded
    } else {
        chapter
            .metadata
            .title
            .as_deref()
            .map(|t| decode_for_save(t.trim()))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("Chapter {}", index + 1))
    };
    text.replace('\n', " ")
}

fn write_paragraph(output: &mut String, paragraph: &RawParagraph) {
    let mut metadata = paragraph.metadata.clone();
    if metadata.id.is_none() {
        metadata.id = paragraph.id.clone();
    }
    push_marker(output, MarkerTag::Paragraph, &metadata);

    output.push_str(&decode_for_save(&paragraph.leading));
    output.push_str(&decode_for_save(&paragraph.text));
    output.push_str(&decode_for_save(&paragraph.trailing));
    if !output.ends_with('\n') {
        output.push('\n');
    }
}

fn push_marker<M: Serialize>(output: &mut String, tag: MarkerTag, metadata: &M) {
    if let Some(fields) = schema::encode(tag, metadata) {
        output.push_str(&marker_comment(tag, fields));
    }
}

/// Render a single-line marker comment
pub fn marker_comment(tag: MarkerTag, fields: Map<String, Value>) -> String {
    let mut payload = Map::new();
    payload.insert(tag.key().to_string(), Value::Object(fields));
    format!("<!-- {} -->\n", Value::Object(payload))
}

/// Shorten every run of newlines longer than `max` to exactly `max`
pub fn collapse_newlines(text: &str, max: usize) -> String {
    let max = max.max(1);
    let mut result = String::with_capacity(text.len());
    let mut run = 0;
    for ch in text.chars() {
        if ch == '\n' {
            run += 1;
            if run > max {
                continue;
            }
        } else {
            run = 0;
        }
        result.push(ch);
    }
    result
}
