//! Comment threads attached to documents, chapters and paragraphs
//!
//! Every node carries exactly one `Comments` record. The record is opaque to
//! the model apart from its four well-known fields; anything else a plugin
//! stored alongside them is kept in `extra` and written back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Comment thread state for a single node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comments {
    /// Thread messages, in the shape the owning plugin chose
    #[serde(default)]
    pub messages: Vec<Value>,
    /// Thread status (plugin-defined; `null` when unset)
    #[serde(default)]
    pub status: Option<Value>,
    /// Plugin that owns the thread
    #[serde(default)]
    pub plugin: String,
    /// When the owning plugin last opened the thread
    #[serde(default)]
    pub plugin_last_opened: String,
    /// Unrecognized keys, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Comments {
    /// Create an empty comment thread
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the thread carries no information at all
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
            && self.status.as_ref().map_or(true, Value::is_null)
            && self.plugin.is_empty()
            && self.plugin_last_opened.is_empty()
            && self.extra.is_empty()
    }
}
