// Rust guideline compliant 2026-10-16

//! Environment-aware error sanitization.
//!
//! Field emission follows the allow-list. When internal errors are hidden and
//! the error classifies as internal, the message is replaced and details and
//! stack are dropped; that rule is applied last and beats the allow-list.

use crate::config::{ErrorField, RuntimeConfig};
use crate::metadata::iso_timestamp;
use crate::models::{CodeValue, ErrorInfo, RawError};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Message sent in place of an internal error's own message.
pub const GENERIC_INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Message used when an error carries none.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An error occurred";

/// Type tag used when an error declares neither type nor name.
pub const DEFAULT_ERROR_TYPE: &str = "Error";

/// Generic runtime-error kinds that always classify as internal.
pub const INTERNAL_ERROR_NAMES: [&str; 4] =
    ["ReferenceError", "TypeError", "SyntaxError", "InternalError"];

/// Returns true if the error is the server's own fault.
///
/// An error is internal when its type or name is a generic runtime kind,
/// when its status is 500 or above, or when it carries no status at all.
#[must_use]
pub fn is_internal(error: &RawError) -> bool {
    classify(error, None)
}

/// Like [`is_internal`], with `status` standing in for a missing status.
///
/// Used when the response status is known but the error carries none.
#[must_use]
pub fn is_internal_at_status(error: &RawError, status: u16) -> bool {
    classify(error, Some(status))
}

fn classify(error: &RawError, fallback_status: Option<u16>) -> bool {
    let generic = [error.kind.as_deref(), error.name.as_deref()]
        .into_iter()
        .flatten()
        .any(|declared| INTERNAL_ERROR_NAMES.contains(&declared));

    generic
        || error
            .status_code
            .or(fallback_status)
            .map_or(true, |status| status >= 500)
}

/// Sanitizes an error using the current clock for `timestamp`.
#[must_use]
pub fn sanitize(error: &RawError, config: &RuntimeConfig) -> ErrorInfo {
    sanitize_at(error, config, Utc::now())
}

/// Sanitizes an error sent with response status `status`.
///
/// The status only takes part in internal classification. It never becomes
/// the emitted `code`.
#[must_use]
pub fn sanitize_for_status(error: &RawError, config: &RuntimeConfig, status: u16) -> ErrorInfo {
    sanitize_with(error, config, Utc::now(), Some(status))
}

/// Sanitizes an error against an explicit construction time.
#[must_use]
pub fn sanitize_at(error: &RawError, config: &RuntimeConfig, at: DateTime<Utc>) -> ErrorInfo {
    sanitize_with(error, config, at, None)
}

fn sanitize_with(
    error: &RawError,
    config: &RuntimeConfig,
    at: DateTime<Utc>,
    fallback_status: Option<u16>,
) -> ErrorInfo {
    let policy = &config.errors;
    let mut info = ErrorInfo::default();

    if policy.allows(ErrorField::Message) {
        info.message = Some(
            error
                .message
                .clone()
                .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
        );
    }

    if policy.allows(ErrorField::Type) {
        info.kind = Some(
            error
                .kind
                .clone()
                .or_else(|| error.name.clone())
                .unwrap_or_else(|| DEFAULT_ERROR_TYPE.to_string()),
        );
    }

    if policy.allows(ErrorField::Code) {
        info.code = error
            .code
            .clone()
            .or_else(|| error.status_code.map(CodeValue::Status));
    }

    if policy.allows(ErrorField::Details) {
        info.details = error.details.clone();
    }

    if config.mode.is_development() && policy.include_stack {
        info.stack = error.stack.clone();
    }

    if config.response.include_timestamp {
        info.timestamp = Some(iso_timestamp(at));
    }

    if policy.hide_internal_errors && classify(error, fallback_status) {
        if info.message.is_some() {
            info.message = Some(GENERIC_INTERNAL_MESSAGE.to_string());
        }
        info.details = None;
        info.stack = None;
    }

    info
}

/// Sanitizes an arbitrary JSON error value.
///
/// Objects and strings are read field by field. Any other shape yields
/// [`redacted`] instead of failing.
#[must_use]
pub fn sanitize_value(value: &Value, config: &RuntimeConfig) -> ErrorInfo {
    match value {
        Value::Object(_) | Value::String(_) => sanitize(&RawError::from_value(value), config),
        _ => redacted(config),
    }
}

/// The most redacted view the allow-list permits.
#[must_use]
pub fn redacted(config: &RuntimeConfig) -> ErrorInfo {
    let policy = &config.errors;
    ErrorInfo {
        message: policy
            .allows(ErrorField::Message)
            .then(|| GENERIC_INTERNAL_MESSAGE.to_string()),
        kind: policy
            .allows(ErrorField::Type)
            .then(|| DEFAULT_ERROR_TYPE.to_string()),
        ..ErrorInfo::default()
    }
}
