// Rust guideline compliant 2026-10-16

//! Per-request and per-message context.

use std::time::Instant;
use uuid::Uuid;

/// Where a request or message came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Origin {
    /// An HTTP request.
    Http {
        /// Request method.
        method: String,
        /// Request path.
        path: String,
    },
    /// An inbound channel event.
    Socket {
        /// Originating socket identifier.
        socket_id: String,
        /// Inbound event name.
        event: String,
    },
    /// Unknown origin.
    #[default]
    Unknown,
}

/// Context captured when a request or message starts.
///
/// The correlation token and start time live for exactly one request or
/// message and are never shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    correlation_id: Option<String>,
    started_at: Option<Instant>,
    origin: Origin,
}

impl RequestContext {
    /// Creates an empty context: no correlation token, no start time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with a fresh UUID v4 token, started now.
    #[must_use]
    pub fn generated() -> Self {
        Self::new()
            .with_correlation_id(Uuid::new_v4().to_string())
            .started_now()
    }

    /// Creates a context from an inbound correlation header value.
    ///
    /// Blank or missing values get a freshly generated token.
    #[must_use]
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(id) => Self::new().with_correlation_id(id).started_now(),
            None => Self::generated(),
        }
    }

    /// Sets the correlation token.
    #[must_use]
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Records the start time as now.
    #[must_use]
    pub fn started_now(self) -> Self {
        self.started_at(Instant::now())
    }

    /// Records an explicit start time.
    #[must_use]
    pub fn started_at(mut self, instant: Instant) -> Self {
        self.started_at = Some(instant);
        self
    }

    /// Marks the context as an HTTP request.
    #[must_use]
    pub fn http(mut self, method: impl Into<String>, path: impl Into<String>) -> Self {
        self.origin = Origin::Http {
            method: method.into(),
            path: path.into(),
        };
        self
    }

    /// Marks the context as a channel event.
    #[must_use]
    pub fn socket(mut self, socket_id: impl Into<String>, event: impl Into<String>) -> Self {
        self.origin = Origin::Socket {
            socket_id: socket_id.into(),
            event: event.into(),
        };
        self
    }

    /// Correlation token, if any.
    #[must_use]
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// Start time, if recorded.
    #[must_use]
    pub fn start(&self) -> Option<Instant> {
        self.started_at
    }

    /// Origin of the request or message.
    #[must_use]
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Milliseconds between the start time and `now`.
    #[must_use]
    pub fn elapsed_ms(&self, now: Instant) -> Option<u64> {
        self.started_at.map(|start| {
            u64::try_from(now.saturating_duration_since(start).as_millis()).unwrap_or(u64::MAX)
        })
    }
}
