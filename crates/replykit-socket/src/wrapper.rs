// Rust guideline compliant 2026-10-16

//! Handler wrapper that turns failures into error emissions.

use crate::responder::SocketResponder;
use futures_util::FutureExt;
use replykit_core::RawError;
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

/// Name given to errors recovered from a panicking handler.
pub const PANIC_ERROR_NAME: &str = "InternalError";

/// How a wrapped handler invocation ended.
#[derive(Debug)]
pub enum WrapOutcome {
    /// The handler returned `Ok`.
    Completed,
    /// The handler failed and one error envelope was emitted.
    Recovered(RawError),
    /// The handler failed and the error envelope could not be emitted.
    Undelivered(RawError, replykit_core::Error),
}

impl WrapOutcome {
    /// Returns true when the handler itself succeeded.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Wraps a socket handler.
///
/// Errors returned by the handler and panics raised while building or
/// polling its future are logged and emitted once through
/// [`SocketResponder::error`]. Nothing propagates to the caller.
pub fn wrapper<H>(handler: H) -> Wrapped<H> {
    Wrapped { handler }
}

/// A handler produced by [`wrapper`].
#[derive(Debug, Clone)]
pub struct Wrapped<H> {
    handler: H,
}

impl<H> Wrapped<H> {
    /// Runs the handler for one inbound message.
    pub async fn call<P, Fut>(&self, responder: SocketResponder, payload: P) -> WrapOutcome
    where
        H: Fn(SocketResponder, P) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        let started =
            panic::catch_unwind(AssertUnwindSafe(|| (self.handler)(responder.clone(), payload)));
        let outcome = match started {
            Ok(future) => AssertUnwindSafe(future).catch_unwind().await,
            Err(panic) => Err(panic),
        };
        let raw = match outcome {
            Ok(Ok(())) => return WrapOutcome::Completed,
            Ok(Err(err)) => from_anyhow(&err),
            Err(panic) => from_panic(panic.as_ref()),
        };

        responder.logger().error(
            "socket handler failed",
            Some(&serde_json::json!({
                "correlationId": responder.context().correlation_id(),
                "event": responder.event(),
                "error": &raw,
            })),
        );

        match responder.error(raw.clone(), None) {
            Ok(()) => WrapOutcome::Recovered(raw),
            Err(err) => {
                responder.logger().error(
                    "failed to emit handler error",
                    Some(&serde_json::json!({ "error": err.to_string() })),
                );
                WrapOutcome::Undelivered(raw, err)
            }
        }
    }
}

fn from_anyhow(err: &anyhow::Error) -> RawError {
    match err.downcast_ref::<RawError>() {
        Some(raw) => raw.clone(),
        None => RawError::from_std_error(&**err),
    }
}

fn from_panic(panic: &(dyn Any + Send)) -> RawError {
    let message = panic
        .downcast_ref::<&str>()
        .map(|msg| (*msg).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "handler panicked".to_string());
    RawError::new(message).with_name(PANIC_ERROR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_panic_reads_str_and_string() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(from_panic(boxed.as_ref()).message.as_deref(), Some("boom"));

        let boxed: Box<dyn Any + Send> = Box::new(String::from("bang"));
        let raw = from_panic(boxed.as_ref());
        assert_eq!(raw.message.as_deref(), Some("bang"));
        assert_eq!(raw.name.as_deref(), Some(PANIC_ERROR_NAME));

        let boxed: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(
            from_panic(boxed.as_ref()).message.as_deref(),
            Some("handler panicked")
        );
    }

    #[test]
    fn test_from_anyhow_keeps_raw_errors() {
        let raw = RawError::new("quota exceeded").with_status(429);
        let err = anyhow::Error::new(raw.clone());
        assert_eq!(from_anyhow(&err), raw);

        let err = anyhow::anyhow!("plain failure");
        let converted = from_anyhow(&err);
        assert_eq!(converted.message.as_deref(), Some("plain failure"));
        assert_eq!(converted.status_code, None);
    }
}
