use crate::broker::broker_state::{BrokerState, Outbound};
use grenmegle_core::{ConnectionId, RelayedSignal, RoomId, ServerMessage};
use serde_json::Value;
use tracing::{debug, warn};

impl BrokerState {
    /// Forwards a negotiation message to the sender's partner in `room_id`, untouched.
    ///
    /// Messages for unknown rooms or from non-members are dropped.
    pub fn relay(
        &self,
        room_id: &RoomId,
        sender: &ConnectionId,
        kind: String,
        payload: Value,
    ) -> Vec<Outbound> {
        let Some(room) = self.rooms.lookup(room_id) else {
            debug!("Dropping '{}' from {}: no room {}", kind, sender, room_id);
            return Vec::new();
        };
        let Some(partner) = room.partner_of(sender) else {
            warn!("Dropping '{}' from {}: not a member of {}", kind, sender, room_id);
            return Vec::new();
        };

        debug!("Relaying '{}' in {} from {} to {}", kind, room_id, sender, partner);

        vec![Outbound::new(
            partner,
            ServerMessage::Signal(RelayedSignal {
                kind,
                payload,
                sender: *sender,
            }),
        )]
    }
}
