//! Node kinds of the Document → Chapter → Paragraph hierarchy

use serde::{Deserialize, Serialize};

/// Enumeration of all node kinds in the document model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Document,
    Chapter,
    Paragraph,
    Snapshot,
}

impl NodeKind {
    /// Prefix used when generating ids for this kind
    pub fn id_prefix(&self) -> &'static str {
        match self {
            NodeKind::Document => "doc",
            NodeKind::Chapter => "chapter",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Snapshot => "snapshot",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Document => write!(f, "Document"),
            NodeKind::Chapter => write!(f, "Chapter"),
            NodeKind::Paragraph => write!(f, "Paragraph"),
            NodeKind::Snapshot => write!(f, "Snapshot"),
        }
    }
}
