//! The daily log document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One day's worth of captured entries.
///
/// Only `entries` is required. Entries and any unrecognized top-level keys
/// are kept as raw JSON, so documents written by older versions or other
/// tools survive a rewrite untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogDocument {
    /// Eastern calendar date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    pub entries: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// Top-level keys this build does not know about.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LogDocument {
    /// Fresh document with no entries.
    pub fn new(date: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            created_at: created_at.into(),
            entries: Vec::new(),
            last_updated: None,
            extra: Map::new(),
        }
    }

    /// Entries whose `type` tag equals `kind`.
    pub fn entries_of_type<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.get("type").and_then(Value::as_str) == Some(kind))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_document_serialization() {
        let doc = LogDocument::new("2025-01-15", "2025-01-15T00:00:01.000000-05:00");
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({
                "date": "2025-01-15",
                "created_at": "2025-01-15T00:00:01.000000-05:00",
                "entries": []
            })
        );
    }

    #[test]
    fn test_missing_entries_is_rejected() {
        let result: Result<LogDocument, _> =
            serde_json::from_str(r#"{"date": "2025-01-15", "created_at": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let doc: LogDocument = serde_json::from_str(
            r#"{"entries": [], "source": "collector-2", "meta": {"v": 2}}"#,
        )
        .unwrap();
        assert_eq!(doc.date, "");
        assert_eq!(doc.extra["source"], "collector-2");

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["source"], "collector-2");
        assert_eq!(value["meta"], json!({"v": 2}));
    }

    #[test]
    fn test_entries_of_type() {
        let mut doc = LogDocument::new("d", "c");
        doc.entries.push(json!({"type": "api_data", "endpoint": "live"}));
        doc.entries.push(json!({"type": "api_error", "endpoint": "odds"}));
        doc.entries.push(json!({"type": "api_data", "endpoint": "team"}));
        doc.entries.push(json!(42));

        let endpoints: Vec<_> = doc
            .entries_of_type("api_data")
            .map(|e| e["endpoint"].as_str().unwrap())
            .collect();
        assert_eq!(endpoints, vec!["live", "team"]);
        assert_eq!(doc.len(), 4);
    }
}
