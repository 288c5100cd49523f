//! Field path extraction.
//!
//! Paths use `.` between object keys. An array is represented by its first
//! element only, written as `[0]` after the array's path; later elements are
//! assumed to share that shape and are never visited.

use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Every field path reachable in `value`.
///
/// `{"a": {"b": 1}, "c": [{"d": 2}]}` yields `a`, `a.b`, `c[0]` and
/// `c[0].d`. Scalars and empty containers at the top level yield nothing.
pub fn extract_fields(value: &Value) -> BTreeSet<String> {
    let mut fields = BTreeSet::new();

    match value {
        Value::Object(members) => collect_members(members, None, &mut fields),
        Value::Array(items) => {
            if let Some(first) = items.first() {
                record(first, "[0]".to_string(), &mut fields);
            }
        }
        _ => {}
    }

    fields
}

fn collect_members(members: &Map<String, Value>, parent: Option<&str>, fields: &mut BTreeSet<String>) {
    for (key, value) in members {
        let path = match parent {
            Some(parent) => format!("{parent}.{key}"),
            None => key.clone(),
        };
        record(value, path, fields);
    }
}

fn record(value: &Value, path: String, fields: &mut BTreeSet<String>) {
    match value {
        Value::Array(items) if !items.is_empty() => {
            record(&items[0], format!("{path}[0]"), fields);
        }
        Value::Object(members) => {
            collect_members(members, Some(&path), fields);
            fields.insert(path);
        }
        _ => {
            fields.insert(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(paths: &[&str]) -> BTreeSet<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_nested_object_and_array() {
        let payload = json!({"a": {"b": 1}, "c": [{"d": 2}, {"d": 3}]});
        assert_eq!(extract_fields(&payload), set(&["a", "a.b", "c[0]", "c[0].d"]));
    }

    #[test]
    fn test_only_first_element_is_visited() {
        let payload = json!({"items": [{"x": 1}, {"y": 2}]});
        assert_eq!(extract_fields(&payload), set(&["items[0]", "items[0].x"]));
    }

    #[test]
    fn test_top_level_array() {
        let payload = json!([{"id": 1, "tags": ["a"]}]);
        assert_eq!(
            extract_fields(&payload),
            set(&["[0]", "[0].id", "[0].tags[0]"])
        );
    }

    #[test]
    fn test_nested_arrays() {
        let payload = json!({"grid": [[{"v": 1}]]});
        assert_eq!(extract_fields(&payload), set(&["grid[0][0]", "grid[0][0].v"]));
    }

    #[test]
    fn test_empty_containers_and_scalars() {
        assert!(extract_fields(&json!(42)).is_empty());
        assert!(extract_fields(&json!([])).is_empty());
        assert!(extract_fields(&json!({})).is_empty());

        // A key holding an empty array or object is still a field.
        let payload = json!({"results": [], "query": {}, "code": 0});
        assert_eq!(extract_fields(&payload), set(&["code", "query", "results"]));
    }

    #[test]
    fn test_api_envelope() {
        let envelope = json!({
            "code": 0,
            "query": {"total": 1},
            "results": [{"id": "abc", "score": [1, 2], "home": {"name": "X"}}]
        });
        assert_eq!(
            extract_fields(&envelope),
            set(&[
                "code",
                "query",
                "query.total",
                "results[0]",
                "results[0].home",
                "results[0].home.name",
                "results[0].id",
                "results[0].score[0]",
            ])
        );
    }
}
