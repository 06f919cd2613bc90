//! HTML entity decoding for text and metadata values

use serde_json::Value;

type EntityTable = [(&'static str, &'static str)];

/// Replacements applied while parsing, in order. `&lt;` and `&gt;` come
/// before `&amp;`, so `&amp;lt;` decodes one level only.
const PARSE_ENTITIES: &EntityTable = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Replacements applied to text and metadata on save. Editors also leave
/// numeric character references for control characters and slashes;
/// `&amp;` comes last.
const SAVE_ENTITIES: &EntityTable = &[
    ("&#13;", "\n"),
    ("&#10;", "\n"),
    ("&#9;", "\t"),
    ("&nbsp;", " "),
    ("&#x27;", "'"),
    ("&#39;", "'"),
    ("&quot;", "\""),
    ("&#x2F;", "/"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

fn decode_with(value: &str, table: &EntityTable) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    table
        .iter()
        .fold(value.to_string(), |acc, (entity, replacement)| acc.replace(entity, replacement))
}

fn decode_value_with(value: Value, table: &EntityTable) -> Value {
    match value {
        Value::String(s) => Value::String(decode_with(&s, table)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| decode_value_with(item, table))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, nested)| (key, decode_value_with(nested, table)))
                .collect(),
        ),
        other => other,
    }
}

/// Decode the small set of entities the editor may leave in content
pub fn decode_entities(value: &str) -> String {
    decode_with(value, PARSE_ENTITIES)
}

/// Decode entities in every string nested inside a JSON value
pub fn decode_value(value: Value) -> Value {
    decode_value_with(value, PARSE_ENTITIES)
}

/// Decode text on its way to storage, numeric references included
pub fn decode_for_save(value: &str) -> String {
    decode_with(value, SAVE_ENTITIES)
}

/// [`decode_for_save`] applied to every string nested inside a JSON value
pub fn decode_value_for_save(value: Value) -> Value {
    decode_value_with(value, SAVE_ENTITIES)
}

/// Normalize CRLF line endings to LF
pub fn normalize_line_endings(value: &str) -> String {
    value.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; &amp; &quot;c&quot; &#39;d&#39;"), "a <b> & \"c\" 'd'");
        assert_eq!(decode_entities("x&nbsp;y"), "x y");
        assert_eq!(decode_entities("plain"), "plain");
    }

    #[test]
    fn test_amp_decodes_one_level() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_decode_value_recurses() {
        let value = json!({ "a": ["&lt;", { "b": "&gt;" }], "n": 3 });
        assert_eq!(decode_value(value), json!({ "a": ["<", { "b": ">" }], "n": 3 }));
    }

    #[test]
    fn test_save_decodes_numeric_references() {
        assert_eq!(
            decode_for_save("a&#9;b &#x2F; c&#13;d&#10;e &#x27;q&#x27;"),
            "a\tb / c\nd\ne 'q'"
        );
        assert_eq!(decode_for_save("&amp;lt;"), "&lt;");
        // parsing leaves numeric references alone
        assert_eq!(decode_entities("a&#9;b"), "a&#9;b");
    }

    #[test]
    fn test_save_decodes_nested_metadata() {
        let value = json!({ "title": "A&#x2F;B", "tasks": [{ "note": "x&#10;y" }] });
        assert_eq!(
            decode_value_for_save(value),
            json!({ "title": "A/B", "tasks": [{ "note": "x\ny" }] })
        );
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\n"), "a\nb\n");
    }
}
