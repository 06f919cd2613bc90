//! Node ID generation and management

use crate::NodeKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node in the document model.
///
/// Ids are opaque strings once persisted: anything found in a marker comment
/// is accepted verbatim. Freshly generated ids take the form
/// `<kind prefix>-<uuid v4>`, e.g. `chapter-2b0c…`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Generate a new random id for a node of the given kind
    pub fn generate(kind: NodeKind) -> Self {
        Self::with_prefix(kind.id_prefix())
    }

    /// Generate a new random id with an arbitrary prefix
    pub fn with_prefix(prefix: &str) -> Self {
        Self(format!("{}-{}", prefix, Uuid::new_v4()))
    }

    /// Wrap an existing id string.
    ///
    /// Returns `None` for blank input; a blank id is treated as absent
    /// everywhere in the model.
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value.to_string()))
        }
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_carry_kind_prefix() {
        let id = NodeId::generate(NodeKind::Chapter);
        assert!(id.as_str().starts_with("chapter-"));
        assert_ne!(id, NodeId::generate(NodeKind::Chapter));
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(NodeId::parse("  "), None);
        assert_eq!(NodeId::parse("p1"), Some(NodeId::from("p1")));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = NodeId::from("d1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"d1\"");
        let back: NodeId = serde_json::from_str("\"d1\"").unwrap();
        assert_eq!(back, "d1");
    }
}
