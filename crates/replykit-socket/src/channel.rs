// Rust guideline compliant 2026-10-16

//! Host channel abstraction, destinations, and an in-memory channel.

use replykit_core::Result;
use serde_json::Value;
use std::fmt;
use std::sync::Mutex;

/// Emission operations the adapter needs from a host channel.
pub trait SocketChannel: Send + Sync {
    /// Identifier of the originating socket.
    fn id(&self) -> &str;

    /// Emits to the originating socket.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport rejects the emission.
    fn emit(&self, event: &str, payload: &Value) -> Result<()>;

    /// Emits to every member of a named room.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport rejects the emission.
    fn emit_to_room(&self, room: &str, event: &str, payload: &Value) -> Result<()>;

    /// Emits to one peer socket.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport rejects the emission.
    fn emit_to_peer(&self, peer: &str, event: &str, payload: &Value) -> Result<()>;
}

/// Resolved emission target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The originating socket.
    Origin,
    /// A named room.
    Room(String),
    /// A specific peer socket.
    Peer(String),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => f.write_str("self"),
            Self::Room(room) => write!(f, "room:{room}"),
            Self::Peer(peer) => write!(f, "peer:{peer}"),
        }
    }
}

/// Targeting applied to a responder.
///
/// Both fields may be set; [`Target::resolve`] picks the most specific.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    room: Option<String>,
    peer: Option<String>,
}

impl Target {
    /// Returns a copy targeting `room`.
    #[must_use]
    pub fn with_room(&self, room: impl Into<String>) -> Self {
        Self {
            room: Some(room.into()),
            ..self.clone()
        }
    }

    /// Returns a copy targeting `peer`.
    #[must_use]
    pub fn with_peer(&self, peer: impl Into<String>) -> Self {
        Self {
            peer: Some(peer.into()),
            ..self.clone()
        }
    }

    /// Peer beats room beats origin.
    #[must_use]
    pub fn resolve(&self) -> Destination {
        match (&self.peer, &self.room) {
            (Some(peer), _) => Destination::Peer(peer.clone()),
            (None, Some(room)) => Destination::Room(room.clone()),
            (None, None) => Destination::Origin,
        }
    }
}

/// One emission captured by [`MemoryChannel`].
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    /// Where it went.
    pub destination: Destination,
    /// Event name.
    pub event: String,
    /// Payload.
    pub payload: Value,
}

/// Channel that records emissions in memory.
#[derive(Debug)]
pub struct MemoryChannel {
    id: String,
    emissions: Mutex<Vec<Emission>>,
}

impl MemoryChannel {
    /// Creates a channel for socket `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            emissions: Mutex::new(Vec::new()),
        }
    }

    /// All emissions so far.
    #[must_use]
    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn push(&self, destination: Destination, event: &str, payload: &Value) {
        self.emissions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Emission {
                destination,
                event: event.to_string(),
                payload: payload.clone(),
            });
    }
}

impl SocketChannel for MemoryChannel {
    fn id(&self) -> &str {
        &self.id
    }

    fn emit(&self, event: &str, payload: &Value) -> Result<()> {
        self.push(Destination::Origin, event, payload);
        Ok(())
    }

    fn emit_to_room(&self, room: &str, event: &str, payload: &Value) -> Result<()> {
        self.push(Destination::Room(room.to_string()), event, payload);
        Ok(())
    }

    fn emit_to_peer(&self, peer: &str, event: &str, payload: &Value) -> Result<()> {
        self.push(Destination::Peer(peer.to_string()), event, payload);
        Ok(())
    }
}
