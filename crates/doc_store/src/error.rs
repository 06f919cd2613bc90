//! Error types for store operations

use crate::backend::StorageError;
use doc_model::{DocModelError, NodeId, NodeKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Invalid document key: {0:?}")]
    InvalidDocumentKey(String),

    #[error("Unknown document field: {0}")]
    UnknownField(String),

    #[error("{kind} not found: {id}")]
    NotFoundChild { kind: NodeKind, id: NodeId },

    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(NodeId),

    #[error("Failed to persist {path}: {reason}")]
    Persist { path: String, reason: String },

    /// The response to a read starts with the error sentinel but does not
    /// read as a missing file: it may be an error or a document whose text
    /// happens to begin that way.
    #[error("Ambiguous storage response for {path}: {message}")]
    SentinelTextCollision { path: String, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document model error: {0}")]
    DocModel(DocModelError),
}

impl From<DocModelError> for StoreError {
    fn from(err: DocModelError) -> Self {
        match err {
            DocModelError::NodeNotFound { kind, id } => StoreError::NotFoundChild { kind, id },
            other => StoreError::DocModel(other),
        }
    }
}

impl StoreError {
    pub fn chapter_not_found(id: &NodeId) -> Self {
        StoreError::NotFoundChild {
            kind: NodeKind::Chapter,
            id: id.clone(),
        }
    }

    pub fn paragraph_not_found(id: &NodeId) -> Self {
        StoreError::NotFoundChild {
            kind: NodeKind::Paragraph,
            id: id.clone(),
        }
    }

    /// Whether the error means the requested node or document is absent
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound(_) | StoreError::NotFoundChild { .. } | StoreError::SnapshotNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
