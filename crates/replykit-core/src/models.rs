// Rust guideline compliant 2026-10-16

//! Wire data model: envelopes, sanitized errors, metadata, raw errors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// An error code as carried on the wire: numeric status or symbolic text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodeValue {
    /// HTTP-style status code.
    Status(u16),
    /// Symbolic code such as `E_VALIDATION`.
    Text(String),
}

impl From<u16> for CodeValue {
    fn from(value: u16) -> Self {
        Self::Status(value)
    }
}

impl From<&str> for CodeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CodeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// An unsanitized error as supplied by a handler.
///
/// Every field is optional; nothing downstream assumes any of them is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawError {
    /// Raw message, possibly containing internal detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error class name, e.g. `TypeError`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Explicit type tag.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Explicit error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeValue>,
    /// HTTP-style status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Stack or source chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Structured details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl RawError {
    /// Creates an error with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Sets the class name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the explicit type tag.
    #[must_use]
    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the explicit code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<CodeValue>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the status code.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    /// Sets the stack.
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Sets structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Captures a Rust error; the source chain becomes the stack.
    #[must_use]
    pub fn from_std_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(format!("caused by: {cause}"));
            source = cause.source();
        }
        Self {
            message: Some(error.to_string()),
            name: Some("Error".to_string()),
            stack: if chain.is_empty() {
                None
            } else {
                Some(chain.join("\n"))
            },
            ..Self::default()
        }
    }

    /// Extracts an error from an arbitrary JSON value.
    ///
    /// Never fails: unknown shapes yield an error with whatever fields could
    /// be read. `statusCode` and `status` are both accepted, as numbers or
    /// numeric strings.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let object = match value {
            Value::Object(object) => object,
            Value::String(message) => return Self::new(message.clone()),
            _ => return Self::default(),
        };

        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        let code = match object.get("code") {
            Some(Value::String(code)) => Some(CodeValue::Text(code.clone())),
            Some(Value::Number(number)) => Some(
                number
                    .as_u64()
                    .and_then(|n| u16::try_from(n).ok())
                    .map_or_else(|| CodeValue::Text(number.to_string()), CodeValue::Status),
            ),
            _ => None,
        };

        let status_code = object
            .get("statusCode")
            .or_else(|| object.get("status"))
            .and_then(status_from_value);

        Self {
            message: text("message"),
            name: text("name"),
            kind: text("type"),
            code,
            status_code,
            stack: text("stack"),
            details: object.get("details").filter(|v| !v.is_null()).cloned(),
        }
    }

    /// Returns the status code if one is carried.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status_code
    }
}

fn status_from_value(value: &Value) -> Option<u16> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

impl fmt::Display for RawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("Error");
        match &self.message {
            Some(message) => write!(f, "{name}: {message}"),
            None => f.write_str(name),
        }
    }
}

impl std::error::Error for RawError {}

/// Sanitized, client-facing error view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Message, when allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Type tag, when allowed.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Code, when allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeValue>,
    /// Details, when allowed and not redacted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Stack, development mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Construction time, when the response policy includes timestamps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ErrorInfo {
    /// Returns the wire names of the populated fields.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.message.is_some() {
            keys.push("message");
        }
        if self.kind.is_some() {
            keys.push("type");
        }
        if self.code.is_some() {
            keys.push("code");
        }
        if self.details.is_some() {
            keys.push("details");
        }
        if self.stack.is_some() {
            keys.push("stack");
        }
        if self.timestamp.is_some() {
            keys.push("timestamp");
        }
        keys
    }
}

/// Pagination block injected into `meta.pagination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page, 1-based.
    pub page: u64,
    /// Page size.
    pub limit: u64,
    /// Total number of items.
    pub total: u64,
    /// Total number of pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    /// Whether a later page exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    /// Whether an earlier page exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_prev: Option<bool>,
}

impl Pagination {
    /// Creates a pagination block with only the three core fields.
    #[must_use]
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: None,
            has_next: None,
            has_prev: None,
        }
    }

    /// Fills `totalPages`, `hasNext`, and `hasPrev` from the core fields.
    #[must_use]
    pub fn with_derived(mut self) -> Self {
        let total_pages = if self.limit == 0 {
            0
        } else {
            self.total.div_ceil(self.limit)
        };
        self.total_pages = Some(total_pages);
        self.has_next = Some(self.page < total_pages);
        self.has_prev = Some(self.page > 1);
        self
    }
}

/// Cross-cutting response metadata.
///
/// Stored as a key/value map so that custom fields can share the key space
/// with the built-in ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseMeta(Map<String, Value>);

impl ResponseMeta {
    /// Correlation token key.
    pub const REQUEST_ID: &'static str = "requestId";
    /// Construction time key.
    pub const TIMESTAMP: &'static str = "timestamp";
    /// Elapsed milliseconds key.
    pub const EXECUTION_TIME: &'static str = "executionTime";
    /// Runtime mode key.
    pub const ENVIRONMENT: &'static str = "environment";
    /// Version tag key.
    pub const VERSION: &'static str = "version";
    /// Pagination key.
    pub const PAGINATION: &'static str = "pagination";

    /// Creates empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a field.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Returns a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the correlation token.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.get(Self::REQUEST_ID).and_then(Value::as_str)
    }

    /// Returns the construction timestamp.
    #[must_use]
    pub fn timestamp(&self) -> Option<&str> {
        self.get(Self::TIMESTAMP).and_then(Value::as_str)
    }

    /// Returns the elapsed milliseconds.
    #[must_use]
    pub fn execution_time(&self) -> Option<u64> {
        self.get(Self::EXECUTION_TIME).and_then(Value::as_u64)
    }

    /// Returns the pagination block.
    #[must_use]
    pub fn pagination(&self) -> Option<&Value> {
        self.get(Self::PAGINATION)
    }

    /// Sets the pagination block.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be serialized.
    pub fn set_pagination(&mut self, pagination: &Pagination) -> crate::Result<()> {
        self.insert(Self::PAGINATION, serde_json::to_value(pagination)?);
        Ok(())
    }

    /// Iterates over the fields.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// The canonical response envelope.
///
/// Built only through [`crate::envelope::build`], which enforces the shape
/// rules: `data` only on success, `error` only on failure, `meta` never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub(crate) success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<ErrorInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) meta: Option<ResponseMeta>,
}

impl ResponseEnvelope {
    /// Success discriminant.
    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    /// Payload, present only on success.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Summary message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Sanitized error, present only on failure.
    #[must_use]
    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    /// Metadata, absent when no field was generated.
    #[must_use]
    pub fn meta(&self) -> Option<&ResponseMeta> {
        self.meta.as_ref()
    }

    /// Serializes the envelope into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if a payload value fails to serialize.
    pub fn to_value(&self) -> crate::Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
