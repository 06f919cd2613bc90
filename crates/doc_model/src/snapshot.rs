//! Frozen copies of a document

use crate::{Document, NodeId, NodeKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A deep copy of a document taken at a point in time.
///
/// The copy shares nothing with the live document it was taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: NodeId,
    pub created_at: DateTime<Utc>,
    pub document_id: NodeId,
    pub title: String,
    pub data: Document,
}

impl Snapshot {
    /// Capture the current state of `document`
    pub fn capture(document: &Document, title: Option<String>) -> Self {
        Self {
            id: NodeId::generate(NodeKind::Snapshot),
            created_at: Utc::now(),
            document_id: document.id.clone(),
            title: title.unwrap_or_else(|| format!("{} snapshot", document.title)),
            data: document.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_is_independent_of_live_document() {
        let mut doc = Document::new("/a.md", "Draft");
        let snapshot = Snapshot::capture(&doc, None);
        doc.chapters[0].set_title("Changed");

        assert_eq!(snapshot.title, "Draft snapshot");
        assert_eq!(snapshot.data.chapters[0].title, "Chapter 1");
        assert_eq!(snapshot.document_id, doc.id);
    }
}
