//! Response envelope helpers
//!
//! Mutating endpoints answer with `{ code, message, date }`. Only presence is
//! checked for `code` and `date`; their values are opaque.

use serde_json::Value as JsonValue;

/// Fields every creation and booking response must carry
pub const REQUIRED_FIELDS: [&str; 3] = ["code", "message", "date"];

/// Returns the required envelope fields absent from `body`
pub fn missing_fields(body: &JsonValue) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| body.get(field).is_none())
        .collect()
}

/// The `message` field as text, if present
pub fn message(body: &JsonValue) -> Option<&str> {
    body.get("message").and_then(JsonValue::as_str)
}

/// Whether `body` carries a `message` field at all
pub fn has_message(body: &JsonValue) -> bool {
    body.get("message").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields() {
        let full = json!({"code": "PROVIDER_CREATED", "message": "ok", "date": "2025-08-05"});
        assert!(missing_fields(&full).is_empty());

        let partial = json!({"message": "Bad request"});
        assert_eq!(missing_fields(&partial), vec!["code", "date"]);
    }

    #[test]
    fn test_null_field_counts_as_present() {
        let body = json!({"code": null, "message": "x", "date": null});
        assert!(missing_fields(&body).is_empty());
    }

    #[test]
    fn test_message() {
        let body = json!({"message": "Availability added successfully"});
        assert_eq!(message(&body), Some("Availability added successfully"));
        assert_eq!(message(&json!({"error": "x"})), None);
        assert!(!has_message(&json!({})));
    }
}
