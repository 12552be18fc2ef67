// Rust guideline compliant 2026-10-16

//! Replykit Core Library
//!
//! This crate provides the transport-agnostic half of Replykit:
//! - Data model (ResponseEnvelope, ErrorInfo, ResponseMeta, RawError)
//! - Runtime configuration with hot-swappable snapshots
//! - Metadata generation (request id, timestamp, execution time)
//! - Error sanitization (allow-list, internal-error redaction)
//! - Envelope assembly and status families
//! - Logger contract with `tracing` and in-memory sinks

pub mod config;
pub mod context;
pub mod envelope;
pub mod error;
pub mod kit;
pub mod logger;
pub mod metadata;
pub mod models;
pub mod sanitize;
pub mod status;

pub use config::{
    ConfigHandle, ErrorField, ErrorPolicy, LogFormat, LogLevel, LoggingPatch, LoggingPolicy,
    ResponsePolicy, RuntimeConfig, RuntimeMode,
};
pub use context::{Origin, RequestContext};
pub use error::{Error, ErrorCode, Result};
pub use kit::Replykit;
pub use logger::{
    init_tracing, EventKind, LogEvent, LogRecord, Logger, MemoryLogger, TracingLogger,
};
pub use models::{CodeValue, ErrorInfo, Pagination, RawError, ResponseEnvelope, ResponseMeta};
pub use sanitize::{
    is_internal, is_internal_at_status, sanitize, sanitize_for_status, GENERIC_INTERNAL_MESSAGE,
};
pub use status::StatusKind;
