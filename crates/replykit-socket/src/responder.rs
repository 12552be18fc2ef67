// Rust guideline compliant 2026-10-16

//! Socket response adapter.
//!
//! Emits the same envelope the HTTP adapter writes, plus a `statusCode`
//! field, to the origin socket, a room, or a single peer. Errors are
//! sanitized once per call and the resulting view is what gets emitted and
//! logged.

use crate::channel::{Destination, SocketChannel, Target};
use chrono::Utc;
use replykit_core::metadata::{generate_at, iso_timestamp};
use replykit_core::status::{default_message_for, is_success_code};
use replykit_core::{
    envelope, sanitize, CodeValue, ErrorInfo, EventKind, LogEvent, Logger, RawError,
    Replykit, RequestContext, ResponseEnvelope, Result, RuntimeConfig, StatusKind,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Wire payload: the flattened envelope plus the status code.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SocketPayload<'a> {
    #[serde(flatten)]
    envelope: &'a ResponseEnvelope,
    status_code: u16,
}

/// Emits envelopes over a socket channel.
///
/// Targeting methods return a new responder, so one responder can fan out
/// to several destinations without its own target changing.
#[derive(Clone)]
pub struct SocketResponder {
    channel: Arc<dyn SocketChannel>,
    ctx: RequestContext,
    config: Arc<RuntimeConfig>,
    logger: Arc<dyn Logger>,
    event: String,
    target: Target,
}

impl SocketResponder {
    /// Creates a responder for one inbound message and records it.
    pub fn new(kit: &Replykit, channel: Arc<dyn SocketChannel>, ctx: RequestContext) -> Self {
        let config = kit.config();
        let logger = kit.logger();
        logger.log_request(&ctx);
        Self {
            event: config.response.default_event.clone(),
            channel,
            ctx,
            config,
            logger,
            target: Target::default(),
        }
    }

    /// Responder that emits to `room`.
    #[must_use]
    pub fn to_room(&self, room: impl Into<String>) -> Self {
        Self {
            target: self.target.with_room(room),
            ..self.clone()
        }
    }

    /// Responder that emits to the peer socket `peer`.
    #[must_use]
    pub fn to_socket(&self, peer: impl Into<String>) -> Self {
        Self {
            target: self.target.with_peer(peer),
            ..self.clone()
        }
    }

    /// Responder that emits under `event` instead of the default.
    #[must_use]
    pub fn with_event(&self, event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            ..self.clone()
        }
    }

    /// Where the next emission goes.
    #[must_use]
    pub fn destination(&self) -> Destination {
        self.target.resolve()
    }

    /// Event name used by the status-family methods.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Request context.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    /// Logger shared with the kit.
    #[must_use]
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Emits a 200 envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` cannot be serialized or the emission fails.
    pub fn ok(&self, data: impl Serialize, message: Option<&str>) -> Result<()> {
        self.success(StatusKind::Ok, data, message)
    }

    /// Emits a 201 envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` cannot be serialized or the emission fails.
    pub fn created(&self, data: impl Serialize, message: Option<&str>) -> Result<()> {
        self.success(StatusKind::Created, data, message)
    }

    /// Emits a 400 envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the emission fails.
    pub fn bad_request(&self, error: Option<RawError>, message: Option<&str>) -> Result<()> {
        self.failure(StatusKind::BadRequest, error, message)
    }

    /// Emits a 401 envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the emission fails.
    pub fn unauthorized(&self, error: Option<RawError>, message: Option<&str>) -> Result<()> {
        self.failure(StatusKind::Unauthorized, error, message)
    }

    /// Emits a 403 envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the emission fails.
    pub fn forbidden(&self, error: Option<RawError>, message: Option<&str>) -> Result<()> {
        self.failure(StatusKind::Forbidden, error, message)
    }

    /// Emits a 404 envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the emission fails.
    pub fn not_found(&self, error: Option<RawError>, message: Option<&str>) -> Result<()> {
        self.failure(StatusKind::NotFound, error, message)
    }

    /// Emits an error envelope.
    ///
    /// The status comes from `status`, else the error's status code, else a
    /// numeric error code, else 500. The raw error is logged with the
    /// destination before it is sanitized.
    ///
    /// # Errors
    ///
    /// Returns an error if the emission fails.
    pub fn error(&self, error: RawError, status: Option<u16>) -> Result<()> {
        let status = status
            .or(error.status_code)
            .or(match error.code {
                Some(CodeValue::Status(code)) if (400..600).contains(&code) => Some(code),
                _ => None,
            })
            .unwrap_or(StatusKind::InternalServerError.code());

        if self.config.errors.log_errors {
            self.logger.error(
                "socket error",
                Some(&serde_json::json!({
                    "correlationId": self.ctx.correlation_id(),
                    "socketId": self.channel.id(),
                    "event": &self.event,
                    "destination": self.destination().to_string(),
                    "status": status,
                    "error": &error,
                })),
            );
        }

        let info = sanitize::sanitize(&error, &self.config);
        let message = info
            .message
            .clone()
            .unwrap_or_else(|| default_message_for(status).to_string());
        self.dispatch(&self.event, status, false, None, message, Some(info))
    }

    /// Emits under an arbitrary event name.
    ///
    /// Statuses of 400 and above produce a failure envelope whose error is
    /// built from the default message for that status, without a `code`.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` cannot be serialized or the emission fails.
    pub fn emit(&self, event: &str, data: impl Serialize, status: Option<u16>) -> Result<()> {
        let status = status.unwrap_or(StatusKind::Ok.code());
        let message = default_message_for(status).to_string();
        if is_success_code(status) {
            let data = serde_json::to_value(data)?;
            self.dispatch(event, status, true, Some(data), message, None)
        } else {
            let raw = RawError::new(message.clone());
            let info = sanitize::sanitize_for_status(&raw, &self.config, status);
            self.dispatch(event, status, false, None, message, Some(info))
        }
    }

    fn success(&self, kind: StatusKind, data: impl Serialize, message: Option<&str>) -> Result<()> {
        let data = serde_json::to_value(data)?;
        let message = message.unwrap_or(kind.default_message()).to_string();
        self.dispatch(&self.event, kind.code(), true, Some(data), message, None)
    }

    /// The top-level message is the caller's, else the error's own message
    /// unless it is hidden, else the family default.
    fn failure(&self, kind: StatusKind, error: Option<RawError>, message: Option<&str>) -> Result<()> {
        let mut raw = error.unwrap_or_default();
        if raw.message.is_none() {
            raw.message = Some(message.unwrap_or(kind.default_message()).to_string());
        }
        let info = sanitize::sanitize_for_status(&raw, &self.config, kind.code());
        let hidden = self.config.errors.hide_internal_errors
            && sanitize::is_internal_at_status(&raw, kind.code());
        let message = match message {
            Some(message) => message.to_string(),
            None if hidden => kind.default_message().to_string(),
            None => info
                .message
                .clone()
                .unwrap_or_else(|| kind.default_message().to_string()),
        };
        self.dispatch(&self.event, kind.code(), false, None, message, Some(info))
    }

    fn dispatch(
        &self,
        event: &str,
        status: u16,
        success: bool,
        data: Option<Value>,
        message: String,
        error: Option<ErrorInfo>,
    ) -> Result<()> {
        let now = Instant::now();
        let meta = generate_at(&self.config, &self.ctx, Utc::now(), now);
        let envelope = envelope::build(success, data, Some(message), error, meta);
        let execution_time = self.ctx.elapsed_ms(now);
        let destination = self.destination();

        self.record(status, &envelope, execution_time, &destination);

        let payload = serde_json::to_value(SocketPayload {
            envelope: &envelope,
            status_code: status,
        })?;
        match destination {
            Destination::Origin => self.channel.emit(event, &payload),
            Destination::Room(room) => self.channel.emit_to_room(&room, event, &payload),
            Destination::Peer(peer) => self.channel.emit_to_peer(&peer, event, &payload),
        }
    }

    fn record(
        &self,
        status: u16,
        envelope: &ResponseEnvelope,
        execution_time: Option<u64>,
        destination: &Destination,
    ) {
        self.logger
            .log_response(&self.ctx, status, envelope, execution_time);
        self.logger.log_event(&LogEvent {
            kind: EventKind::for_status(status),
            status_code: status,
            correlation_id: self.ctx.correlation_id().map(str::to_string),
            execution_time,
            data: envelope.data().cloned(),
            error: envelope
                .error()
                .and_then(|info| serde_json::to_value(info).ok()),
            destination: Some(destination.to_string()),
            timestamp: iso_timestamp(Utc::now()),
        });
    }
}
