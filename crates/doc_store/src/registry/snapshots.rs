//! Snapshot operations
//!
//! Snapshots live in memory only, keyed by document path, oldest first.

use super::DocumentRegistry;
use crate::document_key::resolve_path;
use crate::backend::StorageBackend;
use crate::hydrate;
use crate::{Result, StoreError};
use doc_model::{Document, NodeId, Snapshot};

impl<B: StorageBackend> DocumentRegistry<B> {
    pub fn list_snapshots(&self, document: &str) -> &[Snapshot] {
        resolve_path(document)
            .ok()
            .and_then(|path| self.snapshots.get(&path))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Capture the current state of a document.
    ///
    /// When a snapshot limit is configured the oldest snapshots are dropped
    /// to stay within it.
    pub async fn add_snapshot(&mut self, document: &str, title: Option<String>) -> Result<Snapshot> {
        let path = &resolve_path(document)?;
        let snapshot = Snapshot::capture(self.get(path).await?, title);
        let limit = self.settings.max_snapshots_per_document;

        let snapshots = self.snapshots.entry(path.to_string()).or_default();
        snapshots.push(snapshot.clone());
        if limit > 0 && snapshots.len() > limit {
            let excess = snapshots.len() - limit;
            snapshots.drain(..excess);
        }
        tracing::debug!("Snapshot {} taken of {}", snapshot.id, path);
        Ok(snapshot)
    }

    pub fn delete_snapshot(&mut self, document: &str, snapshot_id: &NodeId) -> Result<Snapshot> {
        let path = &resolve_path(document)?;
        let snapshots = self
            .snapshots
            .get_mut(path)
            .ok_or_else(|| StoreError::SnapshotNotFound(snapshot_id.clone()))?;
        let index = snapshots
            .iter()
            .position(|s| &s.id == snapshot_id)
            .ok_or_else(|| StoreError::SnapshotNotFound(snapshot_id.clone()))?;
        Ok(snapshots.remove(index))
    }

    /// Replace a document with the state captured in one of its snapshots
    /// and save it. The snapshot itself is kept.
    pub async fn restore_snapshot(&mut self, document: &str, snapshot_id: &NodeId) -> Result<&Document> {
        let path = &resolve_path(document)?;
        let data = self
            .list_snapshots(path)
            .iter()
            .find(|s| &s.id == snapshot_id)
            .map(|s| hydrate::dehydrate(&s.data))
            .ok_or_else(|| StoreError::SnapshotNotFound(snapshot_id.clone()))?;

        let document = hydrate::hydrate_with(data, path, &self.settings.hydrate_options());
        tracing::info!("Restoring {} from snapshot {}", path, snapshot_id);
        self.cache(document);
        self.save(path).await
    }
}
