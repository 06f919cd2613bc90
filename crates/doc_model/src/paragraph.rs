//! Paragraph node - a block of text with its metadata

use crate::{Annotations, Comments, NodeId, NodeKind, ParagraphMetadata};
use serde::{Deserialize, Serialize};

/// Content kind assigned to paragraphs that do not declare one
pub const DEFAULT_PARAGRAPH_KIND: &str = "markdown";

/// A paragraph inside a chapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub id: NodeId,
    /// Back-reference to the owning chapter (not an ownership edge)
    pub chapter_id: NodeId,
    /// Persisted view of this paragraph, refreshed by `sync`
    pub metadata: ParagraphMetadata,
    pub text: String,
    /// Whitespace preceding `text`, kept for lossless spacing
    pub leading: String,
    /// Whitespace following `text`, kept for lossless spacing
    pub trailing: String,
    /// Content kind
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub annotations: Annotations,
}

impl Paragraph {
    /// Create an empty markdown paragraph with a fresh id
    pub fn new(chapter_id: NodeId) -> Self {
        Self::with_text(chapter_id, "")
    }

    /// Create a markdown paragraph with the given text
    pub fn with_text(chapter_id: NodeId, text: impl Into<String>) -> Self {
        let id = NodeId::generate(NodeKind::Paragraph);
        Self {
            metadata: ParagraphMetadata {
                id: Some(id.clone()),
                kind: Some(DEFAULT_PARAGRAPH_KIND.to_string()),
                ..Default::default()
            },
            id,
            chapter_id,
            text: text.into(),
            leading: String::new(),
            trailing: "\n".to_string(),
            kind: DEFAULT_PARAGRAPH_KIND.to_string(),
            annotations: Annotations::default(),
        }
    }

    pub fn comments(&self) -> &Comments {
        &self.annotations.comments
    }

    /// Optional paragraph title (stored only in metadata)
    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }
}
