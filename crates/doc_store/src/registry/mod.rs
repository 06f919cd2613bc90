//! Document registry
//!
//! The registry owns every cached document, the snapshots taken of them and
//! the id index used for id-only lookups. All storage traffic goes through
//! the [`StorageBackend`] it was built with, and every mutation is written
//! back before the call returns. A failed write leaves the in-memory change
//! in place; the next successful save persists it.
//!
//! Operations that name a document take either its storage path or its
//! [`document_key`](crate::document_key). Documents are cached by path.

mod chapters;
mod documents;
mod paragraphs;
mod snapshots;
mod variables;

pub use chapters::{ChapterUpdate, NewChapter};
pub use documents::{DocumentOverrides, DocumentUpdate};
pub use paragraphs::{NewParagraph, ParagraphUpdate};

use crate::document_key::resolve_path;
use crate::backend::{is_missing_file, sentinel_message, StorageBackend};
use crate::index::NodeIndex;
use crate::settings::StoreSettings;
use crate::{Result, StoreError};
use doc_model::{Document, NodeId, NodeKind, Snapshot};
use std::collections::HashMap;

/// Cache of hydrated documents backed by a storage collaborator
pub struct DocumentRegistry<B> {
    backend: B,
    settings: StoreSettings,
    documents: HashMap<String, Document>,
    snapshots: HashMap<String, Vec<Snapshot>>,
    index: NodeIndex,
    /// Cached paths, oldest first; id lookups prefer earlier documents
    load_order: Vec<String>,
}

impl<B: StorageBackend> DocumentRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self::with_settings(backend, StoreSettings::default())
    }

    pub fn with_settings(backend: B, settings: StoreSettings) -> Self {
        Self {
            backend,
            settings,
            documents: HashMap::new(),
            snapshots: HashMap::new(),
            index: NodeIndex::new(),
            load_order: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    pub fn is_cached(&self, document: &str) -> bool {
        resolve_path(document).map_or(false, |path| self.documents.contains_key(&path))
    }

    /// Read a file through the backend, classifying sentinel responses
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let response = self.backend.read_text(path).await?;
        match sentinel_message(&response) {
            None => Ok(response),
            Some(message) if is_missing_file(message) => Err(StoreError::NotFound(path.to_string())),
            Some(message) => Err(StoreError::SentinelTextCollision {
                path: path.to_string(),
                message: message.to_string(),
            }),
        }
    }

    /// Write a file through the backend; any failure is a persist error
    async fn persist_text(&self, path: &str, content: &str) -> Result<()> {
        let response = match self.backend.write_text(path, content).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Failed to persist {}: {}", path, e);
                return Err(StoreError::Persist {
                    path: path.to_string(),
                    reason: e.to_string(),
                });
            }
        };
        if let Some(message) = sentinel_message(&response) {
            tracing::warn!("Failed to persist {}: {}", path, message);
            return Err(StoreError::Persist {
                path: path.to_string(),
                reason: message.to_string(),
            });
        }
        Ok(())
    }

    fn cached(&self, path: &str) -> Result<&Document> {
        self.documents
            .get(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    fn cached_mut(&mut self, path: &str) -> Result<&mut Document> {
        self.documents
            .get_mut(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    async fn ensure_loaded(&mut self, path: &str) -> Result<()> {
        if !self.documents.contains_key(path) {
            self.load(path).await?;
        }
        Ok(())
    }

    /// Put a document in the cache, replacing any previous copy, and
    /// re-index it
    fn cache(&mut self, document: Document) {
        let path = document.path.clone();
        let orphans = self.index.unregister_document(&path);
        self.index.register_document(&document);
        self.load_order.retain(|p| p != &path);
        self.load_order.push(path.clone());
        self.documents.insert(path, document);
        self.reconcile(&orphans);
    }

    fn uncache(&mut self, path: &str) -> Option<Document> {
        let removed = self.documents.remove(path);
        self.load_order.retain(|p| p != path);
        let orphans = self.index.unregister_document(path);
        self.reconcile(&orphans);
        removed
    }

    /// Re-point orphaned ids at the earliest loaded document still holding
    /// them
    fn reconcile(&mut self, orphans: &[(NodeId, NodeKind)]) {
        let documents = &self.documents;
        let ordered = self.load_order.iter().filter_map(|path| documents.get(path));
        self.index.reconcile(orphans, ordered);
    }

    fn index_nodes(&mut self, path: &str, nodes: &[(NodeId, NodeKind)]) {
        for (id, kind) in nodes {
            self.index.insert(id.clone(), path, *kind);
        }
    }

    /// Drop ids a mutation removed from `path`, re-pointing them at any
    /// remaining holder
    fn forget_nodes(&mut self, path: &str, nodes: &[(NodeId, NodeKind)]) {
        let orphans: Vec<(NodeId, NodeKind)> = nodes
            .iter()
            .filter(|(id, _)| self.index.remove(id, path).is_some())
            .cloned()
            .collect();
        self.reconcile(&orphans);
    }

    /// Path of the cached document holding a chapter
    fn chapter_path(&self, chapter_id: &NodeId) -> Result<String> {
        self.index
            .locate(chapter_id, NodeKind::Chapter)
            .map(str::to_string)
            .ok_or_else(|| StoreError::chapter_not_found(chapter_id))
    }

    /// Path of the cached document holding a paragraph
    fn paragraph_path(&self, paragraph_id: &NodeId) -> Result<String> {
        self.index
            .locate(paragraph_id, NodeKind::Paragraph)
            .map(str::to_string)
            .ok_or_else(|| StoreError::paragraph_not_found(paragraph_id))
    }
}
