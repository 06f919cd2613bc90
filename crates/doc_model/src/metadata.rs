//! Typed metadata records, one per node kind
//!
//! These are the records persisted in marker comments. Each kind has its own
//! struct; fields shared by all three kinds live in [`Annotations`].

use crate::{Comments, NodeId, Variable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields every node kind carries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotations {
    #[serde(default)]
    pub commands: Vec<Value>,
    #[serde(default)]
    pub comments: Comments,
    #[serde(default)]
    pub plugin_state: Map<String, Value>,
    #[serde(default)]
    pub references: Vec<Value>,
    #[serde(default)]
    pub attachments: Vec<Value>,
    #[serde(default)]
    pub snapshots: Vec<Value>,
    #[serde(default)]
    pub tasks: Vec<Value>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

/// Document-level metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(default)]
    pub id: Option<NodeId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub info_text: Option<String>,
    #[serde(flatten)]
    pub annotations: Annotations,
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Chapter-level metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterMetadata {
    #[serde(default)]
    pub id: Option<NodeId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub annotations: Annotations,
}

/// Paragraph-level metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphMetadata {
    #[serde(default)]
    pub id: Option<NodeId>,
    /// Content kind (`markdown` unless a plugin says otherwise)
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub annotations: Annotations,
    #[serde(default)]
    pub title: Option<String>,
}

impl ChapterMetadata {
    /// Metadata carrying only a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

impl ParagraphMetadata {
    /// Metadata carrying only a content kind
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Default::default()
        }
    }
}
