use crate::broker::broker_state::{BrokerState, Outbound};
use crate::error::BrokerError;
use grenmegle_core::{ConnectionId, ConnectionState, Role, ServerMessage};
use tracing::{debug, error, info, warn};

impl BrokerState {
    /// Pairs `id` with the oldest live waiting connection, or makes it wait.
    ///
    /// The requester becomes the initiator and the dequeued partner the receiver.
    pub fn request_pairing(&mut self, id: &ConnectionId) -> Vec<Outbound> {
        let Some(conn) = self.registry.get(id) else {
            warn!("Pairing request from unknown connection {}", id);
            return Vec::new();
        };
        match conn.state {
            ConnectionState::Queued => {
                debug!("{} is already waiting", id);
                return Vec::new();
            }
            ConnectionState::Matched => {
                debug!("{} asked for a partner while in {:?}", id, conn.room);
                return Vec::new();
            }
            ConnectionState::Idle => {}
        }

        loop {
            let registry = &self.registry;
            let Some(partner) = self.queue.dequeue_oldest(|c| registry.exists(c)) else {
                if self.enqueue(id) {
                    info!("{} added to waiting queue", id);
                }
                return Vec::new();
            };

            if partner == *id {
                error!("{}", BrokerError::SelfMatch(partner));
                continue;
            }

            match self.registry.get(&partner).map(|c| c.state) {
                Some(ConnectionState::Queued) => {}
                state => {
                    warn!("Dropping queue entry {} in state {:?}", partner, state);
                    continue;
                }
            }

            let room_id = match self.rooms.create(*id, partner) {
                Ok(room_id) => room_id,
                Err(e) => {
                    error!("Failed to pair {} with {}: {}", id, partner, e);
                    self.set_idle(&partner);
                    continue;
                }
            };

            for member in [id, &partner] {
                if let Some(conn) = self.registry.get_mut(member) {
                    conn.state = ConnectionState::Matched;
                    conn.room = Some(room_id.clone());
                }
            }

            info!("Matched {} with {} in room {}", id, partner, room_id);

            let match_found = ServerMessage::MatchFound {
                room_id: room_id.clone(),
            };
            return vec![
                Outbound::new(*id, match_found.clone()),
                Outbound::new(partner, match_found),
                Outbound::new(*id, ServerMessage::Role(Role::Initiator)),
                Outbound::new(partner, ServerMessage::Role(Role::Receiver)),
            ];
        }
    }
}
