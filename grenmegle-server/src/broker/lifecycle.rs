use crate::broker::broker_state::{BrokerState, Outbound};
use grenmegle_core::{ConnectionId, ConnectionState, RoomId, ServerMessage};
use tracing::{debug, info};

impl BrokerState {
    /// Tears down `room_id` if `id` is one of its members and tells the partner.
    ///
    /// A connection that is still waiting has its pending request cancelled instead.
    /// Anything else is a no-op, so repeating a leave changes nothing.
    pub fn leave(&mut self, id: &ConnectionId, room_id: &RoomId) -> Vec<Outbound> {
        let is_member = self
            .rooms
            .lookup(room_id)
            .is_some_and(|room| room.contains(id));

        if !is_member {
            if self.queue.remove(id) {
                self.set_idle(id);
                info!("{} stopped waiting", id);
            } else {
                debug!("Ignoring leave of {} by {}", room_id, id);
            }
            return Vec::new();
        }

        self.teardown(id, room_id)
    }

    /// Removes every trace of `id`: its room (partner notified), its queue entry and its record.
    /// Safe to call in any state and more than once.
    pub fn disconnect(&mut self, id: &ConnectionId) -> Vec<Outbound> {
        let room_id = self
            .registry
            .get(id)
            .and_then(|conn| conn.room.clone())
            .or_else(|| self.rooms.room_of(id).cloned());

        let outbound = match room_id {
            Some(room_id) => self.teardown(id, &room_id),
            None => Vec::new(),
        };

        self.queue.remove(id);
        if self.registry.remove(id).is_some() {
            info!("Connection unregistered: {}", id);
        }

        outbound
    }

    fn teardown(&mut self, leaver: &ConnectionId, room_id: &RoomId) -> Vec<Outbound> {
        let Some(room) = self.rooms.destroy(room_id) else {
            return Vec::new();
        };

        for member in room.members() {
            self.set_idle(&member);
        }
        info!("Room {} closed by {}", room_id, leaver);

        match room.partner_of(leaver) {
            Some(partner) if self.registry.exists(&partner) => {
                vec![Outbound::new(partner, ServerMessage::PartnerLeft)]
            }
            _ => Vec::new(),
        }
    }

    /// `true` when no room or queue entry refers to `id`.
    pub fn is_detached(&self, id: &ConnectionId) -> bool {
        !self.queue.contains(id)
            && self.rooms.room_of(id).is_none()
            && self
                .registry
                .get(id)
                .is_none_or(|conn| conn.state == ConnectionState::Idle && conn.room.is_none())
    }
}
