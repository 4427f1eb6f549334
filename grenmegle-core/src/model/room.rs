use crate::model::connection::ConnectionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Room identifier, `"<receiver>#<initiator>"`.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Derives the id of the room formed when `initiator` dequeues the waiting `receiver`.
    pub fn derive(receiver: &ConnectionId, initiator: &ConnectionId) -> Self {
        Self(format!("{receiver}#{initiator}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which side of the negotiation a room member plays. The initiator sends the first offer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Initiator,
    Receiver,
}
