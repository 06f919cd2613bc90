//! Raw parse tree
//!
//! The intermediate structure between text and the live model. The parser
//! fills in only what the text actually says; defaults are the job of
//! hydration.

use doc_model::{ChapterMetadata, DocumentMetadata, NodeId, ParagraphMetadata, DEFAULT_HEADING_LEVEL};

/// A markdown ATX heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

impl Default for Heading {
    fn default() -> Self {
        Self {
            level: DEFAULT_HEADING_LEVEL,
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParagraph {
    pub id: Option<NodeId>,
    pub metadata: ParagraphMetadata,
    pub leading: String,
    pub text: String,
    pub trailing: String,
    /// Whether the paragraph was introduced by a marker comment
    pub has_metadata: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawChapter {
    pub id: Option<NodeId>,
    pub metadata: ChapterMetadata,
    pub heading: Heading,
    /// Text between the chapter marker and the heading line
    pub leading: String,
    pub paragraphs: Vec<RawParagraph>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocument {
    pub id: Option<NodeId>,
    pub metadata: DocumentMetadata,
    pub preface: String,
    pub chapters: Vec<RawChapter>,
}

impl RawDocument {
    /// Total number of paragraphs across all chapters
    pub fn paragraph_count(&self) -> usize {
        self.chapters.iter().map(|c| c.paragraphs.len()).sum()
    }
}
