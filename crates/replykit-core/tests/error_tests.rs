// Rust guideline compliant 2026-10-16

//! Unit tests for error types and raw error extraction.

use replykit_core::{CodeValue, Error, ErrorCode, RawError};
use serde_json::json;

#[test]
fn test_config_error_formatting() {
    let error = Error::Config("default_event must not be empty".to_string());
    assert_eq!(error.to_string(), "Invalid config: default_event must not be empty");
    assert_eq!(error.code(), ErrorCode::InvalidConfig);
}

#[test]
fn test_reply_already_sent_formatting() {
    let error = Error::ReplyAlreadySent;
    assert_eq!(error.to_string(), "Reply already sent");
    assert_eq!(error.code(), ErrorCode::ReplyAlreadySent);
}

#[test]
fn test_json_error_formatting() {
    let json_err = serde_json::from_str::<serde_json::Value>("invalid json")
        .expect_err("Should fail to parse invalid JSON");
    let error = Error::from(json_err);
    assert!(error.to_string().contains("JSON error"));
    assert_eq!(error.code(), ErrorCode::JsonError);
}

#[test]
fn test_error_code_serialization() {
    let value = serde_json::to_value(ErrorCode::TransportError).unwrap();
    assert_eq!(value, json!("transport_error"));
}

#[test]
fn test_raw_error_display() {
    let error = RawError::new("boom").with_name("TypeError");
    assert_eq!(error.to_string(), "TypeError: boom");
    assert_eq!(RawError::default().to_string(), "Error");
}

#[test]
fn test_raw_error_from_std_error_keeps_chain() {
    let inner = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    let outer = Error::Io(inner);
    let raw = RawError::from_std_error(&outer);
    assert_eq!(raw.message.as_deref(), Some("IO error: disk full"));
    assert_eq!(raw.name.as_deref(), Some("Error"));
    assert!(raw.status_code.is_none());
}

#[test]
fn test_raw_error_from_value_reads_every_field() {
    let raw = RawError::from_value(&json!({
        "message": "quota exceeded",
        "name": "LimitError",
        "type": "rate_limit",
        "code": "E_QUOTA",
        "statusCode": 429,
        "stack": "at limiter",
        "details": { "limit": 10 }
    }));
    assert_eq!(raw.message.as_deref(), Some("quota exceeded"));
    assert_eq!(raw.name.as_deref(), Some("LimitError"));
    assert_eq!(raw.kind.as_deref(), Some("rate_limit"));
    assert_eq!(raw.code, Some(CodeValue::Text("E_QUOTA".to_string())));
    assert_eq!(raw.status_code, Some(429));
    assert_eq!(raw.stack.as_deref(), Some("at limiter"));
    assert_eq!(raw.details, Some(json!({ "limit": 10 })));
}

#[test]
fn test_raw_error_from_value_tolerates_bad_shapes() {
    let raw = RawError::from_value(&json!({ "statusCode": "abc", "message": 12, "status": 7 }));
    assert!(raw.message.is_none());
    // `statusCode` is present but unreadable, so `status` is not consulted.
    assert!(raw.status_code.is_none());

    let raw = RawError::from_value(&json!({ "status": "503" }));
    assert_eq!(raw.status_code, Some(503));

    assert_eq!(RawError::from_value(&json!(null)), RawError::default());
    assert_eq!(
        RawError::from_value(&json!("plain")).message.as_deref(),
        Some("plain")
    );
}

#[test]
fn test_numeric_code_becomes_status_code_value() {
    let raw = RawError::from_value(&json!({ "code": 404 }));
    assert_eq!(raw.code, Some(CodeValue::Status(404)));
    let raw = RawError::from_value(&json!({ "code": 70000 }));
    assert_eq!(raw.code, Some(CodeValue::Text("70000".to_string())));
}
