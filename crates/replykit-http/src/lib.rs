// Rust guideline compliant 2026-10-16

//! HTTP adapter for Replykit.
//!
//! Binds the envelope pipeline to any host reply implementing [`HttpReply`].
//! [`BufferedReply`] captures the reply in memory; with the `axum` feature it
//! converts straight into an `axum` response.

pub mod reply;
pub mod responder;

pub use reply::{BufferedReply, HttpReply};
pub use responder::{HttpResponder, SECURITY_HEADERS};
