use crate::model::connection::ConnectionId;
use crate::model::room::{Role, RoomId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Negotiation message a client asks the broker to forward to its partner.
///
/// `kind` and `payload` are never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingSignal {
    pub room: RoomId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

/// Negotiation message as delivered to the partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayedSignal {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: Value,
    pub sender: ConnectionId,
}

/// Body of `leave_room`. Older clients emit the bare room id instead of an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LeaveRoom {
    Object {
        #[serde(rename = "roomId")]
        room_id: RoomId,
    },
    Bare(RoomId),
}

impl LeaveRoom {
    pub fn room_id(&self) -> &RoomId {
        match self {
            LeaveRoom::Object { room_id } | LeaveRoom::Bare(room_id) => room_id,
        }
    }
}

/// Messages a client sends to the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    FindPartner,
    Signal(OutgoingSignal),
    LeaveRoom(LeaveRoom),
}

/// Messages the broker sends to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    Welcome { connection_id: ConnectionId },
    MatchFound { room_id: RoomId },
    Role(Role),
    Signal(RelayedSignal),
    PartnerLeft,
}
