// Rust guideline compliant 2026-10-16

//! Replykit Socket Adapter
//!
//! Emits Replykit envelopes over a real-time channel. A responder targets
//! the originating socket by default; `to_room` and `to_socket` derive
//! responders for other destinations, with a peer taking precedence over a
//! room. [`wrapper`] runs a handler and converts any failure into one error
//! emission.

pub mod channel;
pub mod responder;
pub mod wrapper;

pub use channel::{Destination, Emission, MemoryChannel, SocketChannel, Target};
pub use responder::SocketResponder;
pub use wrapper::{wrapper, WrapOutcome, Wrapped, PANIC_ERROR_NAME};
