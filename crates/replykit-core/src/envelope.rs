// Rust guideline compliant 2026-10-16

//! Envelope assembly.
//!
//! The builder is a pure assembler. Errors arrive already sanitized.

use crate::models::{ErrorInfo, ResponseEnvelope, ResponseMeta};
use serde_json::Value;

/// Assembles an envelope from its parts.
///
/// - `data` is kept only when `success` is true and the value is not null.
/// - `error` is kept only when `success` is false.
/// - Empty metadata is dropped.
#[must_use]
pub fn build(
    success: bool,
    data: Option<Value>,
    message: Option<String>,
    error: Option<ErrorInfo>,
    meta: ResponseMeta,
) -> ResponseEnvelope {
    ResponseEnvelope {
        success,
        data: data.filter(|value| success && !value.is_null()),
        message,
        error: error.filter(|_| !success),
        meta: (!meta.is_empty()).then_some(meta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_drops_error() {
        let envelope = build(
            true,
            Some(json!({"id": 1})),
            Some("fetched".to_string()),
            Some(ErrorInfo::default()),
            ResponseMeta::new(),
        );
        assert!(envelope.success());
        assert_eq!(envelope.data(), Some(&json!({"id": 1})));
        assert!(envelope.error().is_none());
        assert!(envelope.meta().is_none());
    }

    #[test]
    fn test_failure_drops_data() {
        let error = ErrorInfo {
            message: Some("missing".to_string()),
            ..ErrorInfo::default()
        };
        let envelope = build(false, Some(json!({"id": 42})), None, Some(error.clone()), ResponseMeta::new());
        assert!(envelope.data().is_none());
        assert_eq!(envelope.error(), Some(&error));
    }

    #[test]
    fn test_null_data_is_absent() {
        let envelope = build(true, Some(Value::Null), None, None, ResponseMeta::new());
        assert_eq!(envelope.to_value().unwrap(), json!({"success": true}));
    }

    #[test]
    fn test_meta_kept_when_populated() {
        let mut meta = ResponseMeta::new();
        meta.insert("requestId", json!("r-1"));
        let envelope = build(true, None, None, None, meta);
        assert_eq!(
            envelope.to_value().unwrap(),
            json!({"success": true, "meta": {"requestId": "r-1"}})
        );
    }
}
