// Rust guideline compliant 2026-10-16

//! Error types for the Replykit core library.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Replykit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Stable error codes for tooling and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Configuration file, environment value, or validation failure.
    InvalidConfig,
    /// IO failure while reading or writing configuration or logs.
    IoError,
    /// Payload could not be serialized to JSON.
    JsonError,
    /// The HTTP reply was already finalized.
    ReplyAlreadySent,
    /// The host transport rejected the write.
    TransportError,
}

/// Error types for Replykit operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Invalid config: {0}")]
    Config(String),

    /// The reply was already sent by another code path.
    #[error("Reply already sent")]
    ReplyAlreadySent,

    /// The transport failed to deliver the response.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Io(_) => ErrorCode::IoError,
            Error::Json(_) => ErrorCode::JsonError,
            Error::Config(_) => ErrorCode::InvalidConfig,
            Error::ReplyAlreadySent => ErrorCode::ReplyAlreadySent,
            Error::Transport(_) => ErrorCode::TransportError,
        }
    }
}
