//! Node id index
//!
//! Maps chapter and paragraph ids to the cached document that holds them, so
//! id-only lookups don't have to scan every document. Ids are not unique
//! across (or even within) documents; the first holder registered wins and
//! keeps winning until it goes away.

use doc_model::{Document, NodeId, NodeKind};
use std::collections::HashMap;

/// Where an indexed node lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub path: String,
    pub kind: NodeKind,
}

#[derive(Debug, Default)]
pub struct NodeIndex {
    entries: HashMap<NodeId, IndexEntry>,
}

impl NodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, id: &NodeId) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    /// Path of the document holding a node of the given kind
    pub fn locate(&self, id: &NodeId, kind: NodeKind) -> Option<&str> {
        self.entries
            .get(id)
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.path.as_str())
    }

    /// Register an id unless it is already held. Returns whether it was added.
    pub fn insert(&mut self, id: NodeId, path: &str, kind: NodeKind) -> bool {
        use std::collections::hash_map::Entry;
        match self.entries.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(IndexEntry {
                    path: path.to_string(),
                    kind,
                });
                true
            }
        }
    }

    /// Drop an id if it currently points into `path`
    pub fn remove(&mut self, id: &NodeId, path: &str) -> Option<IndexEntry> {
        if self.entries.get(id).map_or(false, |entry| entry.path == path) {
            self.entries.remove(id)
        } else {
            None
        }
    }

    /// Register every chapter and paragraph of a document, in document order
    pub fn register_document(&mut self, document: &Document) {
        for chapter in &document.chapters {
            self.insert(chapter.id.clone(), &document.path, NodeKind::Chapter);
            for paragraph in &chapter.paragraphs {
                self.insert(paragraph.id.clone(), &document.path, NodeKind::Paragraph);
            }
        }
    }

    /// Drop every id that points into `path`; returns the dropped ids
    pub fn unregister_document(&mut self, path: &str) -> Vec<(NodeId, NodeKind)> {
        let dropped: Vec<(NodeId, NodeKind)> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.path == path)
            .map(|(id, entry)| (id.clone(), entry.kind))
            .collect();
        for (id, _) in &dropped {
            self.entries.remove(id);
        }
        dropped
    }

    /// Re-point orphaned ids at any other document still holding them
    pub fn reconcile<'a>(
        &mut self,
        orphans: &[(NodeId, NodeKind)],
        documents: impl IntoIterator<Item = &'a Document> + Clone,
    ) {
        for (id, kind) in orphans {
            if self.entries.contains_key(id) {
                continue;
            }
            let holder = documents.clone().into_iter().find(|doc| match kind {
                NodeKind::Chapter => doc.chapter(id).is_some(),
                NodeKind::Paragraph => doc.find_paragraph(id).is_some(),
                _ => false,
            });
            if let Some(doc) = holder {
                self.insert(id.clone(), &doc.path, *kind);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_holder_wins() {
        let mut index = NodeIndex::new();
        let id = NodeId::from("p");
        assert!(index.insert(id.clone(), "/a.md", NodeKind::Paragraph));
        assert!(!index.insert(id.clone(), "/b.md", NodeKind::Paragraph));
        assert_eq!(index.locate(&id, NodeKind::Paragraph), Some("/a.md"));
        assert_eq!(index.locate(&id, NodeKind::Chapter), None);
    }

    #[test]
    fn test_remove_only_from_owning_path() {
        let mut index = NodeIndex::new();
        let id = NodeId::from("c");
        index.insert(id.clone(), "/a.md", NodeKind::Chapter);
        assert!(index.remove(&id, "/b.md").is_none());
        assert!(index.remove(&id, "/a.md").is_some());
        assert!(index.is_empty());
    }

    #[test]
    fn test_reconcile_moves_to_remaining_holder() {
        let a = Document::new("/a.md", "A");
        let mut b = Document::new("/b.md", "B");
        b.chapters[0].id = a.chapters[0].id.clone();

        let mut index = NodeIndex::new();
        index.register_document(&a);
        index.register_document(&b);
        let shared = a.chapters[0].id.clone();
        assert_eq!(index.locate(&shared, NodeKind::Chapter), Some("/a.md"));

        let orphans = index.unregister_document("/a.md");
        index.reconcile(&orphans, [&b]);
        assert_eq!(index.locate(&shared, NodeKind::Chapter), Some("/b.md"));
    }
}
