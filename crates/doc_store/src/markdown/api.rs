//! Public entry points of the markdown codec

use super::entities::{decode_entities, normalize_line_endings};
use super::parser;
use super::raw::RawDocument;
use super::scanner::strip_markers;
use super::writer::{self, WriteOptions};
use std::fmt;

/// Result of parsing a markdown document
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub document: RawDocument,
    /// Problems found while parsing; parsing itself never fails
    pub warnings: Vec<ParseWarning>,
}

impl ParseReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn warnings_of_kind(&self, kind: WarningKind) -> impl Iterator<Item = &ParseWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }
}

/// A non-fatal problem found while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl ParseWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A marker payload field had the wrong shape and was dropped
    MalformedMetadata,
    /// A document marker after the first one was ignored
    DuplicateDocumentMarker,
    /// Content before the first paragraph marker became its own paragraph
    UnmarkedContent,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::MalformedMetadata => write!(f, "Malformed metadata"),
            WarningKind::DuplicateDocumentMarker => write!(f, "Duplicate document marker"),
            WarningKind::UnmarkedContent => write!(f, "Unmarked content"),
        }
    }
}

/// Parse markdown text into a raw document tree
pub fn parse_markdown(text: &str) -> ParseReport {
    let mut warnings = Vec::new();
    let document = parser::parse_document(text, &mut warnings);
    ParseReport { document, warnings }
}

/// Serialize a raw document tree with default options
pub fn serialize_markdown(document: &RawDocument) -> String {
    writer::write_document(document, &WriteOptions::default())
}

/// Serialize a raw document tree
pub fn serialize_markdown_with(document: &RawDocument, options: &WriteOptions) -> String {
    writer::write_document(document, options)
}

/// Plain text of a document with every marker comment removed
pub fn strip_marker_comments(text: &str) -> String {
    decode_entities(strip_markers(&normalize_line_endings(text)).trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_helpers() {
        let report = parse_markdown("<!-- {\"achiles-ide-document\":{\"id\":\"d\",\"title\":5}} -->\n# A\n");
        assert!(report.has_warnings());
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.warnings_of_kind(WarningKind::MalformedMetadata).count(), 1);
        assert!(report.warnings[0].to_string().starts_with("Malformed metadata"));
    }

    #[test]
    fn test_strip_marker_comments() {
        let text = "<!-- {\"achiles-ide-document\":{\"id\":\"d\"}} -->\r\n# A &amp; B\r\n<!-- note -->\r\n";
        assert_eq!(strip_marker_comments(text), "# A & B\n<!-- note -->");
    }
}
