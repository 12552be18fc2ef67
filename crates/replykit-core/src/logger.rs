// Rust guideline compliant 2026-10-16

//! Logging contract used by the adapters, with `tracing` and in-memory sinks.

use crate::config::{LogFormat, LogLevel, LoggingPatch, LoggingPolicy};
use crate::context::{Origin, RequestContext};
use crate::models::ResponseEnvelope;
use crate::Result;
use serde::Serialize;
use serde_json::Value;
use std::fs::OpenOptions;
use std::sync::{Mutex, RwLock};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

/// Kind of a structured response event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Status below 400.
    Success,
    /// Status 400 or above.
    Error,
}

impl EventKind {
    /// Classifies a status code.
    #[must_use]
    pub fn for_status(status: u16) -> Self {
        if status >= 400 {
            Self::Error
        } else {
            Self::Success
        }
    }

    /// Stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Structured record of one response or emission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    /// Event kind.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Status code sent, or carried in the socket payload.
    pub status_code: u16,
    /// Correlation token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// Milliseconds since the request started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<u64>,
    /// Success payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Error view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    /// Socket destination label, e.g. `room:lobby`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// ISO-8601 time of the event.
    pub timestamp: String,
}

/// Logging sink consumed by the adapters.
pub trait Logger: Send + Sync {
    /// Writes one leveled line.
    fn log(&self, level: LogLevel, message: &str, meta: Option<&Value>);

    /// Debug line.
    fn debug(&self, message: &str, meta: Option<&Value>) {
        self.log(LogLevel::Debug, message, meta);
    }

    /// Info line.
    fn info(&self, message: &str, meta: Option<&Value>) {
        self.log(LogLevel::Info, message, meta);
    }

    /// Warning line.
    fn warn(&self, message: &str, meta: Option<&Value>) {
        self.log(LogLevel::Warn, message, meta);
    }

    /// Error line.
    fn error(&self, message: &str, meta: Option<&Value>) {
        self.log(LogLevel::Error, message, meta);
    }

    /// Error line that ignores the master switch and the minimum level.
    fn error_always(&self, message: &str, meta: Option<&Value>);

    /// Records an incoming request or message.
    fn log_request(&self, ctx: &RequestContext);

    /// Records an outgoing response.
    fn log_response(
        &self,
        ctx: &RequestContext,
        status: u16,
        envelope: &ResponseEnvelope,
        execution_time: Option<u64>,
    );

    /// Records a structured response event.
    fn log_event(&self, event: &LogEvent);

    /// Applies a partial logging policy.
    fn update_config(&self, patch: &LoggingPatch);
}

/// Severity used for response lines and events: warnings for failures.
fn response_level(status: u16) -> LogLevel {
    if status >= 400 {
        LogLevel::Warn
    } else {
        LogLevel::Info
    }
}

fn read_policy(lock: &RwLock<LoggingPolicy>) -> LoggingPolicy {
    lock.read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

fn write_policy(lock: &RwLock<LoggingPolicy>, patch: &LoggingPatch) {
    let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    patch.apply(&mut guard);
}

/// [`Logger`] backed by `tracing` macros.
#[derive(Debug, Default)]
pub struct TracingLogger {
    policy: RwLock<LoggingPolicy>,
}

impl TracingLogger {
    /// Creates a logger with the given policy.
    #[must_use]
    pub fn new(policy: LoggingPolicy) -> Self {
        Self {
            policy: RwLock::new(policy),
        }
    }

    /// Returns the current policy.
    #[must_use]
    pub fn policy(&self) -> LoggingPolicy {
        read_policy(&self.policy)
    }

    fn permits(&self, level: LogLevel) -> bool {
        let policy = self.policy();
        policy.enabled && policy.level.permits(level)
    }
}

macro_rules! emit_at {
    ($level:expr, $($rest:tt)+) => {
        match $level {
            LogLevel::Error => tracing::error!($($rest)+),
            LogLevel::Warn => tracing::warn!($($rest)+),
            LogLevel::Info => tracing::info!($($rest)+),
            LogLevel::Debug => tracing::debug!($($rest)+),
        }
    };
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str, meta: Option<&Value>) {
        if !self.permits(level) {
            return;
        }
        let meta = meta.map(Value::to_string).unwrap_or_default();
        emit_at!(level, meta = %meta, "{message}");
    }

    fn error_always(&self, message: &str, meta: Option<&Value>) {
        let meta = meta.map(Value::to_string).unwrap_or_default();
        tracing::error!(meta = %meta, "{message}");
    }

    fn log_request(&self, ctx: &RequestContext) {
        if !self.policy().log_requests || !self.permits(LogLevel::Info) {
            return;
        }
        let correlation_id = ctx.correlation_id().unwrap_or("-");
        match ctx.origin() {
            Origin::Http { method, path } => {
                tracing::info!(correlation_id, method = %method, path = %path, "request received");
            }
            Origin::Socket { socket_id, event } => {
                tracing::info!(correlation_id, socket_id = %socket_id, event = %event, "message received");
            }
            Origin::Unknown => tracing::info!(correlation_id, "request received"),
        }
    }

    fn log_response(
        &self,
        ctx: &RequestContext,
        status: u16,
        envelope: &ResponseEnvelope,
        execution_time: Option<u64>,
    ) {
        let level = response_level(status);
        if !self.policy().log_responses || !self.permits(level) {
            return;
        }
        let correlation_id = ctx.correlation_id().unwrap_or("-");
        let execution_time_ms = execution_time.unwrap_or_default();
        let success = envelope.success();
        emit_at!(
            level,
            correlation_id,
            status,
            success,
            execution_time_ms,
            "response sent"
        );
    }

    fn log_event(&self, event: &LogEvent) {
        let level = response_level(event.status_code);
        if !self.policy().log_responses || !self.permits(level) {
            return;
        }
        let record = serde_json::to_string(event).unwrap_or_default();
        emit_at!(
            level,
            kind = event.kind.as_str(),
            status = event.status_code,
            event = %record,
            "response event"
        );
    }

    fn update_config(&self, patch: &LoggingPatch) {
        write_policy(&self.policy, patch);
    }
}

/// One line captured by [`MemoryLogger`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Level.
    pub level: LogLevel,
    /// Message.
    pub message: String,
    /// Structured fields.
    pub meta: Option<Value>,
}

/// [`Logger`] that keeps everything in memory.
///
/// Applies the same policy gates as [`TracingLogger`].
#[derive(Debug, Default)]
pub struct MemoryLogger {
    policy: RwLock<LoggingPolicy>,
    records: Mutex<Vec<LogRecord>>,
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    /// Creates a logger with the default policy at debug level.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(LoggingPolicy {
            level: LogLevel::Debug,
            ..LoggingPolicy::default()
        })
    }

    /// Creates a logger with an explicit policy.
    #[must_use]
    pub fn with_policy(policy: LoggingPolicy) -> Self {
        Self {
            policy: RwLock::new(policy),
            records: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
        }
    }

    /// All captured lines.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Captured lines at `level`.
    #[must_use]
    pub fn records_at(&self, level: LogLevel) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|record| record.level == level)
            .collect()
    }

    /// All captured events.
    #[must_use]
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn push(&self, level: LogLevel, message: &str, meta: Option<Value>) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(LogRecord {
                level,
                message: message.to_string(),
                meta,
            });
    }

    fn permits(&self, level: LogLevel) -> bool {
        let policy = read_policy(&self.policy);
        policy.enabled && policy.level.permits(level)
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str, meta: Option<&Value>) {
        if self.permits(level) {
            self.push(level, message, meta.cloned());
        }
    }

    fn error_always(&self, message: &str, meta: Option<&Value>) {
        self.push(LogLevel::Error, message, meta.cloned());
    }

    fn log_request(&self, ctx: &RequestContext) {
        if read_policy(&self.policy).log_requests && self.permits(LogLevel::Info) {
            let meta = serde_json::json!({ "correlationId": ctx.correlation_id() });
            self.push(LogLevel::Info, "request received", Some(meta));
        }
    }

    fn log_response(
        &self,
        ctx: &RequestContext,
        status: u16,
        envelope: &ResponseEnvelope,
        execution_time: Option<u64>,
    ) {
        let level = response_level(status);
        if read_policy(&self.policy).log_responses && self.permits(level) {
            let meta = serde_json::json!({
                "correlationId": ctx.correlation_id(),
                "status": status,
                "success": envelope.success(),
                "executionTime": execution_time,
            });
            self.push(level, "response sent", Some(meta));
        }
    }

    fn log_event(&self, event: &LogEvent) {
        let level = response_level(event.status_code);
        if read_policy(&self.policy).log_responses && self.permits(level) {
            self.events
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(event.clone());
        }
    }

    fn update_config(&self, patch: &LoggingPatch) {
        write_policy(&self.policy, patch);
    }
}

fn tracing_level(level: LogLevel) -> tracing::Level {
    match level {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
    }
}

/// Installs the global `tracing` subscriber described by `policy`.
///
/// Returns the appender guard when logging to a file; keep it alive for the
/// lifetime of the process. A subscriber that is already installed is kept.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_tracing(policy: &LoggingPolicy) -> Result<Option<WorkerGuard>> {
    let level = tracing_level(policy.level);

    if let Some(path) = &policy.file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        let builder = fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(writer);
        let _ = match policy.format {
            LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
            LogFormat::Pretty => {
                tracing::subscriber::set_global_default(builder.with_ansi(false).finish())
            }
        };
        return Ok(Some(guard));
    }

    let builder = fmt().with_max_level(level).with_target(false);
    let _ = match policy.format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish()),
    };
    Ok(None)
}
