// Rust guideline compliant 2026-10-16

//! Host reply abstraction and an in-memory implementation.

use replykit_core::{Error, Result};
use serde_json::Value;

/// The three operations the adapter needs from a host HTTP reply.
pub trait HttpReply {
    /// Sets the status code.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is already finalized.
    fn set_status(&mut self, status: u16) -> Result<()>;

    /// Sets a response header, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is already finalized.
    fn set_header(&mut self, name: &str, value: &str) -> Result<()>;

    /// Writes the JSON body and finalizes the reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is already finalized or the write fails.
    fn send_json(&mut self, body: &Value) -> Result<()>;

    /// Returns true once the reply has been finalized.
    fn is_sent(&self) -> bool;
}

impl<T: HttpReply + ?Sized> HttpReply for &mut T {
    fn set_status(&mut self, status: u16) -> Result<()> {
        (**self).set_status(status)
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        (**self).set_header(name, value)
    }

    fn send_json(&mut self, body: &Value) -> Result<()> {
        (**self).send_json(body)
    }

    fn is_sent(&self) -> bool {
        (**self).is_sent()
    }
}

/// Reply captured in memory.
///
/// With the `axum` feature it converts into an `axum` response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferedReply {
    status: Option<u16>,
    headers: Vec<(String, String)>,
    body: Option<Value>,
    sent: bool,
}

impl BufferedReply {
    /// Creates an empty reply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status code, if set.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// All headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Body, once sent.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.sent {
            Err(Error::ReplyAlreadySent)
        } else {
            Ok(())
        }
    }
}

impl HttpReply for BufferedReply {
    fn set_status(&mut self, status: u16) -> Result<()> {
        self.ensure_open()?;
        self.status = Some(status);
        Ok(())
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        self.ensure_open()?;
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn send_json(&mut self, body: &Value) -> Result<()> {
        self.ensure_open()?;
        self.body = Some(body.clone());
        self.sent = true;
        Ok(())
    }

    fn is_sent(&self) -> bool {
        self.sent
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for BufferedReply {
    fn into_response(self) -> axum::response::Response {
        use axum::http::{HeaderName, HeaderValue, StatusCode};

        let status = StatusCode::from_u16(self.status.unwrap_or(200))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = match self.body {
            Some(body) => (status, axum::Json(body)).into_response(),
            None => status.into_response(),
        };
        for (name, value) in self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                response.headers_mut().insert(name, value);
            }
        }
        response
    }
}
