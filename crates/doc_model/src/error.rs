//! Error types for document model operations

use crate::{NodeId, NodeKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("{kind} not found: {id}")]
    NodeNotFound { kind: NodeKind, id: NodeId },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl DocModelError {
    pub fn chapter_not_found(id: &NodeId) -> Self {
        Self::NodeNotFound {
            kind: NodeKind::Chapter,
            id: id.clone(),
        }
    }

    pub fn paragraph_not_found(id: &NodeId) -> Self {
        Self::NodeNotFound {
            kind: NodeKind::Paragraph,
            id: id.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocModelError>;
