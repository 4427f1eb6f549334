use grenmegle_core::{ConnectionId, RoomId};
use thiserror::Error;

/// Faults detected inside the broker. None of these are ever reported to a client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrokerError {
    #[error("connection {0} is not registered")]
    UnknownConnection(ConnectionId),
    #[error("connection {0} is already in a room")]
    AlreadyInRoom(ConnectionId),
    #[error("connection {0} cannot be paired with itself")]
    SelfMatch(ConnectionId),
    #[error("room {0} already exists")]
    RoomExists(RoomId),
    #[error("broker is no longer running")]
    BrokerGone,
}
