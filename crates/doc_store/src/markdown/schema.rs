//! Metadata schema: allow-lists, lenient decoding and pruning
//!
//! Decoding projects a marker payload onto the typed metadata record of its
//! kind one field at a time, so a single malformed field never costs the
//! rest of the record. Encoding is the inverse projection followed by a
//! recursive prune of empty values.

use super::api::{ParseWarning, WarningKind};
use super::entities::{decode_value, decode_value_for_save};
use super::scanner::MarkerTag;
use doc_model::{
    Annotations, ChapterMetadata, Comments, DocumentMetadata, NodeId, ParagraphMetadata, Variable,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

pub const DOCUMENT_FIELDS: &[&str] = &[
    "id",
    "title",
    "infoText",
    "commands",
    "comments",
    "variables",
    "pluginState",
    "references",
    "attachments",
    "snapshots",
    "tasks",
    "version",
    "updatedAt",
];

pub const CHAPTER_FIELDS: &[&str] = &[
    "id",
    "title",
    "commands",
    "comments",
    "pluginState",
    "references",
    "attachments",
    "snapshots",
    "tasks",
    "variables",
];

pub const PARAGRAPH_FIELDS: &[&str] = &[
    "id",
    "type",
    "commands",
    "comments",
    "pluginState",
    "references",
    "attachments",
    "snapshots",
    "tasks",
    "variables",
    "title",
];

/// Allow-listed field names for a marker kind, in emission order
pub fn allowed_fields(tag: MarkerTag) -> &'static [&'static str] {
    match tag {
        MarkerTag::Document => DOCUMENT_FIELDS,
        MarkerTag::Chapter => CHAPTER_FIELDS,
        MarkerTag::Paragraph => PARAGRAPH_FIELDS,
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Per-payload decoding context collecting field warnings
struct FieldReader<'a> {
    tag: MarkerTag,
    fields: Map<String, Value>,
    warnings: &'a mut Vec<ParseWarning>,
}

impl<'a> FieldReader<'a> {
    fn new(tag: MarkerTag, payload: &Value, warnings: &'a mut Vec<ParseWarning>) -> Self {
        let fields = match payload {
            Value::Object(map) => allowed_fields(tag)
                .iter()
                .filter_map(|key| {
                    map.get(*key)
                        .map(|value| ((*key).to_string(), decode_value(value.clone())))
                })
                .collect(),
            Value::Null => Map::new(),
            other => {
                warnings.push(ParseWarning::new(
                    WarningKind::MalformedMetadata,
                    format!("{} payload is not an object: {}", tag.key(), other),
                ));
                Map::new()
            }
        };
        Self {
            tag,
            fields,
            warnings,
        }
    }

    fn malformed(&mut self, key: &str, value: &Value) {
        self.warnings.push(ParseWarning::new(
            WarningKind::MalformedMetadata,
            format!("{}.{} has an unexpected value: {}", self.tag.key(), key, value),
        ));
    }

    /// Take a field and deserialize it, treating `null` as absent
    fn take<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let value = self.fields.remove(key)?;
        if value.is_null() {
            return None;
        }
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.malformed(key, &value);
                None
            }
        }
    }

    /// Ids may be written as strings or numbers; blank ids are absent
    fn take_id(&mut self) -> Option<NodeId> {
        match self.fields.remove("id")? {
            Value::Null => None,
            Value::String(s) => NodeId::parse(&s),
            Value::Number(n) => NodeId::parse(&n.to_string()),
            other => {
                self.malformed("id", &other);
                None
            }
        }
    }

    fn take_comments(&mut self) -> Comments {
        let Some(value) = self.fields.remove("comments") else {
            return Comments::default();
        };
        let mut map = match value {
            Value::Null => return Comments::default(),
            Value::Object(map) => map,
            other => {
                self.malformed("comments", &other);
                return Comments::default();
            }
        };

        let mut comments = Comments::default();
        match map.remove("messages") {
            None | Some(Value::Null) => {}
            Some(Value::Array(messages)) => comments.messages = messages,
            Some(other) => self.malformed("comments.messages", &other),
        }
        comments.status = map.remove("status").filter(|s| !s.is_null());
        match map.remove("plugin") {
            None | Some(Value::Null) => {}
            Some(Value::String(plugin)) => comments.plugin = plugin,
            Some(other) => self.malformed("comments.plugin", &other),
        }
        match map.remove("pluginLastOpened") {
            None | Some(Value::Null) => {}
            Some(Value::String(opened)) => comments.plugin_last_opened = opened,
            Some(other) => self.malformed("comments.pluginLastOpened", &other),
        }
        comments.extra = map;
        comments
    }

    fn take_variables(&mut self) -> Vec<Variable> {
        let items: Vec<Value> = self.take("variables").unwrap_or_default();
        let mut variables = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<Variable>(item.clone()) {
                Ok(variable) => variables.push(variable),
                Err(_) => self.malformed("variables[]", &item),
            }
        }
        variables
    }

    fn take_annotations(&mut self) -> Annotations {
        Annotations {
            commands: self.take("commands").unwrap_or_default(),
            comments: self.take_comments(),
            plugin_state: self.take("pluginState").unwrap_or_default(),
            references: self.take("references").unwrap_or_default(),
            attachments: self.take("attachments").unwrap_or_default(),
            snapshots: self.take("snapshots").unwrap_or_default(),
            tasks: self.take("tasks").unwrap_or_default(),
            variables: self.take_variables(),
        }
    }
}

/// Decode a document marker payload
pub fn decode_document(payload: &Value, warnings: &mut Vec<ParseWarning>) -> DocumentMetadata {
    let mut reader = FieldReader::new(MarkerTag::Document, payload, warnings);
    DocumentMetadata {
        id: reader.take_id(),
        title: reader.take("title"),
        info_text: reader.take("infoText"),
        annotations: reader.take_annotations(),
        version: reader.take("version"),
        updated_at: reader.take("updatedAt"),
    }
}

/// Decode a chapter marker payload
pub fn decode_chapter(payload: &Value, warnings: &mut Vec<ParseWarning>) -> ChapterMetadata {
    let mut reader = FieldReader::new(MarkerTag::Chapter, payload, warnings);
    ChapterMetadata {
        id: reader.take_id(),
        title: reader.take("title"),
        annotations: reader.take_annotations(),
    }
}

/// Decode a paragraph marker payload
pub fn decode_paragraph(payload: &Value, warnings: &mut Vec<ParseWarning>) -> ParagraphMetadata {
    let mut reader = FieldReader::new(MarkerTag::Paragraph, payload, warnings);
    ParagraphMetadata {
        id: reader.take_id(),
        kind: reader.take("type"),
        annotations: reader.take_annotations(),
        title: reader.take("title"),
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Project a metadata record onto its allow-list and prune it.
///
/// Returns `None` when nothing survives or when no id is present: such a
/// node emits no marker comment.
pub fn encode<M: Serialize>(tag: MarkerTag, metadata: &M) -> Option<Map<String, Value>> {
    let Ok(Value::Object(mut source)) = serde_json::to_value(metadata) else {
        return None;
    };

    let mut projected = Map::new();
    for key in allowed_fields(tag) {
        if let Some(value) = source.remove(*key) {
            projected.insert((*key).to_string(), decode_value_for_save(value));
        }
    }

    match prune(Value::Object(projected)) {
        Some(Value::Object(map)) if map.contains_key("id") => Some(map),
        _ => None,
    }
}

/// Recursively drop blank strings, `null`, empty arrays and empty objects.
///
/// An `id` key is kept whenever its value is not blank. Numbers and booleans
/// always survive.
pub fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) => (!s.trim().is_empty()).then_some(Value::String(s)),
        Value::Array(items) => {
            let kept: Vec<Value> = items.into_iter().filter_map(prune).collect();
            (!kept.is_empty()).then_some(Value::Array(kept))
        }
        Value::Object(map) => {
            let kept: Map<String, Value> = map
                .into_iter()
                .filter_map(|(key, nested)| {
                    if key == "id" {
                        return keep_id(nested).map(|id| (key, id));
                    }
                    prune(nested).map(|pruned| (key, pruned))
                })
                .collect();
            (!kept.is_empty()).then_some(Value::Object(kept))
        }
        scalar => Some(scalar),
    }
}

fn keep_id(value: Value) -> Option<Value> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::Null => None,
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prune_drops_empties_keeps_falsy_scalars() {
        let value = json!({
            "id": "x",
            "title": "",
            "tasks": [],
            "pluginState": {},
            "nested": { "a": null, "b": "  " },
            "count": 0,
            "flag": false,
            "list": ["", "keep", []],
        });
        assert_eq!(
            prune(value),
            Some(json!({ "id": "x", "count": 0, "flag": false, "list": ["keep"] }))
        );
    }

    #[test]
    fn test_encode_minimal_metadata() {
        let metadata = ChapterMetadata {
            id: Some(NodeId::from("x")),
            title: Some(String::new()),
            ..Default::default()
        };
        let encoded = encode(MarkerTag::Chapter, &metadata).unwrap();
        assert_eq!(Value::Object(encoded), json!({ "id": "x" }));
    }

    #[test]
    fn test_encode_without_id_emits_nothing() {
        let metadata = ChapterMetadata::titled("Intro");
        assert!(encode(MarkerTag::Chapter, &metadata).is_none());
    }

    #[test]
    fn test_encode_follows_allow_list_order() {
        let metadata = DocumentMetadata {
            id: Some(NodeId::from("d")),
            title: Some("T".into()),
            version: Some(2),
            updated_at: Some("2024-01-01T00:00:00.000Z".into()),
            ..Default::default()
        };
        let encoded = encode(MarkerTag::Document, &metadata).unwrap();
        let keys: Vec<&str> = encoded.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "title", "version", "updatedAt"]);
    }

    #[test]
    fn test_encode_drops_paragraph_fields_outside_allow_list() {
        let metadata = ParagraphMetadata {
            id: Some(NodeId::from("p")),
            kind: Some("markdown".into()),
            ..Default::default()
        };
        let encoded = encode(MarkerTag::Paragraph, &metadata).unwrap();
        assert_eq!(Value::Object(encoded), json!({ "id": "p", "type": "markdown" }));
    }

    #[test]
    fn test_decode_is_lenient_per_field() {
        let mut warnings = Vec::new();
        let payload = json!({
            "id": 42,
            "title": ["not", "a", "string"],
            "tasks": [{ "done": false }],
            "comments": { "plugin": 7, "pinned": true },
            "unknown": "ignored",
        });
        let metadata = decode_chapter(&payload, &mut warnings);

        assert_eq!(metadata.id, Some(NodeId::from("42")));
        assert_eq!(metadata.title, None);
        assert_eq!(metadata.annotations.tasks, vec![json!({ "done": false })]);
        assert_eq!(metadata.annotations.comments.plugin, "");
        assert_eq!(metadata.annotations.comments.extra.get("pinned"), Some(&json!(true)));
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.kind == WarningKind::MalformedMetadata));
    }

    #[test]
    fn test_decode_non_object_payload() {
        let mut warnings = Vec::new();
        let metadata = decode_paragraph(&json!("oops"), &mut warnings);
        assert_eq!(metadata, ParagraphMetadata::default());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_decode_decodes_entities() {
        let mut warnings = Vec::new();
        let metadata = decode_document(&json!({ "title": "A &amp; B" }), &mut warnings);
        assert_eq!(metadata.title.as_deref(), Some("A & B"));
        assert!(warnings.is_empty());
    }
}
