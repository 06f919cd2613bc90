//! Marker comment scanner
//!
//! Finds `<!-- … -->` comments whose trimmed interior is a JSON object with
//! exactly one key carrying the marker prefix. Anything else is ordinary
//! content and is skipped silently.

use doc_model::NodeKind;
use serde_json::Value;

/// Prefix shared by every structural marker key
pub const MARKER_PREFIX: &str = "achiles-ide-";

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// The three reserved marker keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerTag {
    Document,
    Chapter,
    Paragraph,
}

impl MarkerTag {
    /// JSON key identifying this marker
    pub fn key(&self) -> &'static str {
        match self {
            MarkerTag::Document => "achiles-ide-document",
            MarkerTag::Chapter => "achiles-ide-chapter",
            MarkerTag::Paragraph => "achiles-ide-paragraph",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "achiles-ide-document" => Some(MarkerTag::Document),
            "achiles-ide-chapter" => Some(MarkerTag::Chapter),
            "achiles-ide-paragraph" => Some(MarkerTag::Paragraph),
            _ => None,
        }
    }

    pub fn node_kind(&self) -> NodeKind {
        match self {
            MarkerTag::Document => NodeKind::Document,
            MarkerTag::Chapter => NodeKind::Chapter,
            MarkerTag::Paragraph => NodeKind::Paragraph,
        }
    }
}

/// A recognized marker comment
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerComment {
    pub tag: MarkerTag,
    /// Value stored under the marker key
    pub payload: Value,
    /// Byte offset of `<!--`
    pub start: usize,
    /// Byte offset just past `-->`
    pub end: usize,
}

/// Scan `text` for marker comments, leftmost first and non-overlapping.
///
/// An unclosed `<!--` ends the scan.
pub fn scan(text: &str) -> Vec<MarkerComment> {
    let mut results = Vec::new();
    let mut cursor = 0;

    while cursor < text.len() {
        let Some(start) = text[cursor..].find(COMMENT_OPEN).map(|i| i + cursor) else {
            break;
        };
        let body_start = start + COMMENT_OPEN.len();
        let Some(close) = text[body_start..].find(COMMENT_CLOSE).map(|i| i + body_start) else {
            break;
        };
        let end = close + COMMENT_CLOSE.len();

        if let Some((tag, payload)) = recognize(&text[body_start..close]) {
            results.push(MarkerComment {
                tag,
                payload,
                start,
                end,
            });
        }
        cursor = end;
    }

    results
}

fn recognize(interior: &str) -> Option<(MarkerTag, Value)> {
    let trimmed = interior.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Value::Object(mut map) = serde_json::from_str::<Value>(trimmed).ok()? else {
        return None;
    };

    let mut keys = map.keys().filter(|k| k.starts_with(MARKER_PREFIX));
    let key = keys.next()?.clone();
    if keys.next().is_some() {
        return None;
    }
    let tag = MarkerTag::from_key(&key)?;
    let payload = map.remove(&key)?;
    Some((tag, payload))
}

/// Remove every marker comment from `text`, leaving other comments intact
pub fn strip_markers(text: &str) -> String {
    let markers = scan(text);
    if markers.is_empty() {
        return text.to_string();
    }
    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    for marker in &markers {
        result.push_str(&text[cursor..marker.start]);
        cursor = marker.end;
    }
    result.push_str(&text[cursor..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scan_finds_markers_with_offsets() {
        let text = "a<!-- {\"achiles-ide-chapter\":{\"id\":\"c1\"}} -->b";
        let found = scan(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].tag, MarkerTag::Chapter);
        assert_eq!(found[0].payload, json!({ "id": "c1" }));
        assert_eq!(found[0].start, 1);
        assert_eq!(&text[found[0].end..], "b");
    }

    #[test]
    fn test_scan_skips_non_markers() {
        let text = concat!(
            "<!-- plain comment -->",
            "<!-- {broken json} -->",
            "<!-- [1, 2] -->",
            "<!-- {\"other\": 1} -->",
            "<!-- {\"achiles-ide-chapter\":{}, \"achiles-ide-paragraph\":{}} -->",
            "<!-- {\"achiles-ide-unknown\":{}} -->",
            "<!-- {\"achiles-ide-paragraph\":{\"id\":\"p\"}, \"note\": 1} -->",
        );
        let found = scan(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].tag, MarkerTag::Paragraph);
    }

    #[test]
    fn test_unclosed_comment_stops_scan() {
        let text = "<!-- {\"achiles-ide-chapter\":{}} -->x<!-- never closed";
        assert_eq!(scan(text).len(), 1);
    }

    #[test]
    fn test_scan_resumes_after_closing_delimiter() {
        let text = "<!-- <!-- {\"achiles-ide-chapter\":{}} -->";
        // The first `<!--` swallows the second; the interior is not JSON.
        assert!(scan(text).is_empty());
    }

    #[test]
    fn test_strip_markers_keeps_other_comments() {
        let text = "a<!-- {\"achiles-ide-paragraph\":{}} -->b<!-- note -->c";
        assert_eq!(strip_markers(text), "ab<!-- note -->c");
    }
}
