use crate::broker::broker_state::BrokerStats;
use grenmegle_core::{ConnectionId, OutgoingSignal, RoomId};
use tokio::sync::oneshot;

/// Commands delivered to the broker by the signaling transport.
#[derive(Debug)]
pub enum BrokerCommand {
    /// A client connected. The broker answers with its freshly minted id.
    Register { reply: oneshot::Sender<ConnectionId> },

    /// `find_partner`: pair with the oldest waiting client or start waiting.
    FindPartner { connection_id: ConnectionId },

    /// `signal`: negotiation message for the other member of a room.
    Signal {
        connection_id: ConnectionId,
        signal: OutgoingSignal,
    },

    /// `leave_room`: explicit teardown.
    LeaveRoom {
        connection_id: ConnectionId,
        room_id: RoomId,
    },

    /// The transport for this connection is gone.
    Disconnect { connection_id: ConnectionId },

    Stats { reply: oneshot::Sender<BrokerStats> },

    /// Close every connection and stop the event loop.
    Shutdown,
}

impl BrokerCommand {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            BrokerCommand::Register { .. } => "register",
            BrokerCommand::FindPartner { .. } => "find_partner",
            BrokerCommand::Signal { .. } => "signal",
            BrokerCommand::LeaveRoom { .. } => "leave_room",
            BrokerCommand::Disconnect { .. } => "disconnect",
            BrokerCommand::Stats { .. } => "stats",
            BrokerCommand::Shutdown => "shutdown",
        }
    }
}
