//! Markdown dialect codec
//!
//! Documents are plain markdown with structural metadata carried in
//! single-line HTML comments:
//!
//! ```text
//! <!-- {"achiles-ide-document":{"id":"doc-…","title":"Book"}} -->
//! Preface text
//!
//! <!-- {"achiles-ide-chapter":{"id":"chapter-…"}} -->
//! ## First chapter
//! <!-- {"achiles-ide-paragraph":{"id":"paragraph-…","type":"markdown"}} -->
//! Paragraph body
//! ```
//!
//! Parsing never fails. Unrecognized comments are content, missing structure
//! is left for hydration to fill in and malformed metadata fields become
//! [`ParseWarning`]s.

mod api;
mod entities;
mod parser;
mod raw;
mod scanner;
mod schema;
mod writer;

pub use api::{
    parse_markdown, serialize_markdown, serialize_markdown_with, strip_marker_comments,
    ParseReport, ParseWarning, WarningKind,
};
pub use entities::{decode_entities, decode_for_save, normalize_line_endings};
pub use parser::{parse_heading_line, UNTITLED_CHAPTER_HEADING};
pub use raw::{Heading, RawChapter, RawDocument, RawParagraph};
pub use scanner::{scan, strip_markers, MarkerComment, MarkerTag, MARKER_PREFIX};
pub use schema::{allowed_fields, prune};
pub use writer::{collapse_newlines, WriteOptions};
