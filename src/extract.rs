//! Response item extraction
//!
//! Different vendor endpoints embed their record array under different
//! conventional keys. Extraction is deliberately best effort: a declared
//! `itemsPath` wins when it points at an array, then a fixed list of
//! candidate keys is probed, and as a last resort the whole payload becomes a
//! single record. No error is ever raised here — a wrong guess surfaces as an
//! unexpected shape for the caller, not a failure.

use crate::types::Record;
use serde_json::Value;

/// Conventional response-array keys, probed in priority order
const CANDIDATE_KEYS: [&str; 6] = ["issues", "values", "data", "elements", "results", "items"];

/// Extract the record array from one page payload.
pub fn extract_items(payload: &Value, items_path: Option<&str>) -> Vec<Record> {
    if let Some(key) = items_path {
        if let Some(Value::Array(items)) = payload.get(key) {
            return items.clone();
        }
    }

    for key in CANDIDATE_KEYS {
        if let Some(Value::Array(items)) = payload.get(key) {
            return items.clone();
        }
    }

    vec![payload.clone()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_declared_items_path_wins() {
        let payload = json!({
            "records": [{"id": 1}],
            "values": [{"id": 99}]
        });
        assert_eq!(
            extract_items(&payload, Some("records")),
            vec![json!({"id": 1})]
        );
    }

    #[test]
    fn test_non_array_items_path_falls_through() {
        let payload = json!({
            "records": "not an array",
            "values": [{"id": 2}]
        });
        assert_eq!(
            extract_items(&payload, Some("records")),
            vec![json!({"id": 2})]
        );
    }

    #[test]
    fn test_candidate_key_probe() {
        let payload = json!({"values": [{"id": 1}]});
        assert_eq!(extract_items(&payload, None), vec![json!({"id": 1})]);
    }

    #[test]
    fn test_candidate_priority_order() {
        // "issues" outranks "values"
        let payload = json!({
            "values": [{"from": "values"}],
            "issues": [{"from": "issues"}]
        });
        assert_eq!(
            extract_items(&payload, None),
            vec![json!({"from": "issues"})]
        );
    }

    #[test]
    fn test_whole_payload_fallback() {
        let payload = json!({"foo": [{"id": 1}]});
        assert_eq!(
            extract_items(&payload, None),
            vec![json!({"foo": [{"id": 1}]})]
        );
    }

    #[test]
    fn test_non_array_candidate_skipped() {
        let payload = json!({"data": {"nested": true}, "items": [{"id": 3}]});
        assert_eq!(extract_items(&payload, None), vec![json!({"id": 3})]);
    }

    #[test]
    fn test_empty_array_is_empty_page() {
        let payload = json!({"values": []});
        assert!(extract_items(&payload, None).is_empty());
    }
}
