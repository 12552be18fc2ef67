// Rust guideline compliant 2026-10-16

//! HTTP response adapter.
//!
//! One method per status family, each a thin call into [`HttpResponder::send`].
//! Errors are sanitized once, at the method boundary, and the resulting view
//! flows through metadata, envelope, headers, logging, write.

use crate::reply::HttpReply;
use chrono::Utc;
use replykit_core::metadata::{generate_at, iso_timestamp};
use replykit_core::status::{default_message_for, is_success_code};
use replykit_core::{
    envelope, sanitize, CodeValue, Error, ErrorInfo, EventKind, LogEvent, Logger, Pagination,
    RawError, Replykit, RequestContext, ResponseEnvelope, Result, RuntimeConfig, StatusKind,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Security headers sent when the response policy enables them.
pub const SECURITY_HEADERS: [(&str, &str); 3] = [
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
    ("X-XSS-Protection", "1; mode=block"),
];

/// Builds and writes envelopes to one HTTP reply.
///
/// The configuration snapshot is captured at construction, so a later
/// config update never changes this response.
pub struct HttpResponder<R: HttpReply> {
    reply: R,
    ctx: RequestContext,
    config: Arc<RuntimeConfig>,
    logger: Arc<dyn Logger>,
}

impl<R: HttpReply> HttpResponder<R> {
    /// Creates a responder and records the incoming request.
    pub fn new(kit: &Replykit, reply: R, ctx: RequestContext) -> Self {
        let logger = kit.logger();
        logger.log_request(&ctx);
        Self {
            reply,
            ctx,
            config: kit.config(),
            logger,
        }
    }

    /// Request context.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    /// Configuration snapshot used by this responder.
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Borrows the underlying reply.
    #[must_use]
    pub fn reply(&self) -> &R {
        &self.reply
    }

    /// Returns the underlying reply.
    #[must_use]
    pub fn into_reply(self) -> R {
        self.reply
    }

    /// 200 with data.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` cannot be serialized or the reply is unusable.
    pub fn ok(&mut self, data: impl Serialize, message: Option<&str>) -> Result<()> {
        self.success(StatusKind::Ok, data, message)
    }

    /// 201 with data.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` cannot be serialized or the reply is unusable.
    pub fn created(&mut self, data: impl Serialize, message: Option<&str>) -> Result<()> {
        self.success(StatusKind::Created, data, message)
    }

    /// 202 with data.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` cannot be serialized or the reply is unusable.
    pub fn accepted(&mut self, data: impl Serialize, message: Option<&str>) -> Result<()> {
        self.success(StatusKind::Accepted, data, message)
    }

    /// 204 without data.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is unusable.
    pub fn no_content(&mut self, message: Option<&str>) -> Result<()> {
        self.success(StatusKind::NoContent, Value::Null, message)
    }

    /// 400.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is unusable.
    pub fn bad_request(&mut self, error: Option<RawError>, message: Option<&str>) -> Result<()> {
        self.failure(StatusKind::BadRequest, error, message)
    }

    /// 401.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is unusable.
    pub fn unauthorized(&mut self, error: Option<RawError>, message: Option<&str>) -> Result<()> {
        self.failure(StatusKind::Unauthorized, error, message)
    }

    /// 403.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is unusable.
    pub fn forbidden(&mut self, error: Option<RawError>, message: Option<&str>) -> Result<()> {
        self.failure(StatusKind::Forbidden, error, message)
    }

    /// 404.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is unusable.
    pub fn not_found(&mut self, error: Option<RawError>, message: Option<&str>) -> Result<()> {
        self.failure(StatusKind::NotFound, error, message)
    }

    /// 409.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is unusable.
    pub fn conflict(&mut self, error: Option<RawError>, message: Option<&str>) -> Result<()> {
        self.failure(StatusKind::Conflict, error, message)
    }

    /// 422.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is unusable.
    pub fn unprocessable_entity(
        &mut self,
        error: Option<RawError>,
        message: Option<&str>,
    ) -> Result<()> {
        self.failure(StatusKind::UnprocessableEntity, error, message)
    }

    /// 429.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is unusable.
    pub fn too_many_requests(
        &mut self,
        error: Option<RawError>,
        message: Option<&str>,
    ) -> Result<()> {
        self.failure(StatusKind::TooManyRequests, error, message)
    }

    /// 500.
    ///
    /// A supplied error is always logged at error level, whatever the logging
    /// policy says.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is unusable.
    pub fn internal_server_error(
        &mut self,
        error: Option<RawError>,
        message: Option<&str>,
    ) -> Result<()> {
        if let Some(raw) = &error {
            self.logger.error_always(
                "internal server error",
                Some(&serde_json::json!({
                    "correlationId": self.ctx.correlation_id(),
                    "error": raw,
                })),
            );
        }
        self.failure(StatusKind::InternalServerError, error, message)
    }

    /// Arbitrary status code.
    ///
    /// Codes of 400 and above produce a failure envelope whose error is
    /// built from the message.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` cannot be serialized or the reply is unusable.
    pub fn respond(
        &mut self,
        status: u16,
        data: impl Serialize,
        message: Option<&str>,
    ) -> Result<()> {
        let message = message.unwrap_or(default_message_for(status)).to_string();
        if is_success_code(status) {
            let data = serde_json::to_value(data)?;
            self.send(status, true, Some(data), message, None, None)
        } else {
            let raw = RawError::new(message.clone());
            let info = sanitize::sanitize_for_status(&raw, &self.config, status);
            self.send(status, false, None, message, Some(info), None)
        }
    }

    /// Sends an error, deriving the status from the error itself.
    ///
    /// The status comes from `status`, else the error's status code, else a
    /// numeric error code, else 500.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is unusable.
    pub fn error(&mut self, error: RawError, status: Option<u16>) -> Result<()> {
        let status = status
            .or(error.status_code)
            .or(match error.code {
                Some(CodeValue::Status(code)) if (400..600).contains(&code) => Some(code),
                _ => None,
            })
            .unwrap_or(StatusKind::InternalServerError.code());

        if status >= 500 && self.config.errors.log_errors {
            self.logger.error(
                "request failed",
                Some(&serde_json::json!({
                    "correlationId": self.ctx.correlation_id(),
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
        self.send(status, false, None, message, Some(info), None)
    }

    /// 200 with a `meta.pagination` block.
    ///
    /// Success is decided by whether `data` is non-null.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` cannot be serialized or the reply is unusable.
    pub fn paginate(
        &mut self,
        data: impl Serialize,
        pagination: &Pagination,
        message: Option<&str>,
    ) -> Result<()> {
        let data = serde_json::to_value(data)?;
        let success = !data.is_null();
        let kind = StatusKind::Ok;
        let message = message.unwrap_or(kind.default_message()).to_string();
        self.send(kind.code(), success, Some(data), message, None, Some(pagination))
    }

    fn success(&mut self, kind: StatusKind, data: impl Serialize, message: Option<&str>) -> Result<()> {
        let data = serde_json::to_value(data)?;
        let message = message.unwrap_or(kind.default_message()).to_string();
        self.send(kind.code(), true, Some(data), message, None, None)
    }

    /// The top-level message is the caller's, else the error's own message
    /// unless it is hidden, else the family default.
    fn failure(&mut self, kind: StatusKind, error: Option<RawError>, message: Option<&str>) -> Result<()> {
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
        self.send(kind.code(), false, None, message, Some(info), None)
    }

    fn send(
        &mut self,
        status: u16,
        success: bool,
        data: Option<Value>,
        message: String,
        error: Option<ErrorInfo>,
        pagination: Option<&Pagination>,
    ) -> Result<()> {
        if self.reply.is_sent() {
            return Err(Error::ReplyAlreadySent);
        }

        let now = Instant::now();
        let mut meta = generate_at(&self.config, &self.ctx, Utc::now(), now);
        if let Some(pagination) = pagination {
            meta.set_pagination(pagination)?;
        }
        let envelope = envelope::build(success, data, Some(message), error, meta);
        let execution_time = self.ctx.elapsed_ms(now);

        self.apply_headers()?;
        self.record(status, &envelope, execution_time);

        let body = envelope.to_value()?;
        self.reply.set_status(status)?;
        self.reply.send_json(&body)
    }

    fn apply_headers(&mut self) -> Result<()> {
        let policy = &self.config.response;
        if policy.security_headers {
            for (name, value) in SECURITY_HEADERS {
                self.reply.set_header(name, value)?;
            }
        }
        if policy.correlation_header {
            if let Some(id) = self.ctx.correlation_id() {
                self.reply.set_header(&policy.correlation_header_name, id)?;
            }
        }
        Ok(())
    }

    fn record(&self, status: u16, envelope: &ResponseEnvelope, execution_time: Option<u64>) {
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
            destination: None,
            timestamp: iso_timestamp(Utc::now()),
        });
    }
}
