mod connection;
mod room;
mod signaling;

pub use connection::{ConnectionId, ConnectionState};
pub use room::{Role, RoomId};
pub use signaling::{ClientMessage, LeaveRoom, OutgoingSignal, RelayedSignal, ServerMessage};
