use crate::broker::registry::{Connection, Registry};
use crate::broker::room_table::{Room, RoomTable};
use crate::broker::waiting_queue::WaitingQueue;
use grenmegle_core::{ConnectionId, ConnectionState, RoomId, ServerMessage};
use serde::Serialize;
use tracing::info;

/// A notification produced by a state change, to be delivered once the change is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub to: ConnectionId,
    pub message: ServerMessage,
}

impl Outbound {
    pub fn new(to: ConnectionId, message: ServerMessage) -> Self {
        Self { to, message }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BrokerStats {
    pub connections: usize,
    pub waiting: usize,
    pub rooms: usize,
}

/// All broker state: registry, waiting queue and room table.
///
/// Every operation runs to completion synchronously and hands back the
/// notifications it produced instead of sending them itself. The matchmaker,
/// relay and lifecycle operations live in their own modules.
#[derive(Debug, Default)]
pub struct BrokerState {
    pub(crate) registry: Registry,
    pub(crate) queue: WaitingQueue,
    pub(crate) rooms: RoomTable,
}

impl BrokerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> ConnectionId {
        let id = self.registry.register();
        info!("Connection registered: {}", id);
        id
    }

    /// Removes a connection in whatever state it is, tearing down its queue entry and room.
    pub fn unregister(&mut self, id: &ConnectionId) -> Vec<Outbound> {
        self.disconnect(id)
    }

    pub fn exists(&self, id: &ConnectionId) -> bool {
        self.registry.exists(id)
    }

    /// Puts an `idle` connection at the tail of the waiting queue.
    /// Unknown, already queued and matched connections are left alone.
    pub fn enqueue(&mut self, id: &ConnectionId) -> bool {
        let Some(conn) = self.registry.get_mut(id) else {
            return false;
        };
        if conn.state == ConnectionState::Matched || conn.room.is_some() {
            return false;
        }
        if !self.queue.enqueue(*id) {
            return false;
        }
        conn.state = ConnectionState::Queued;
        true
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.registry.get(id)
    }

    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.lookup(id)
    }

    pub fn is_waiting(&self, id: &ConnectionId) -> bool {
        self.queue.contains(id)
    }

    pub fn waiting(&self) -> impl Iterator<Item = &ConnectionId> {
        self.queue.iter()
    }

    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.registry.ids().copied().collect()
    }

    pub fn stats(&self) -> BrokerStats {
        BrokerStats {
            connections: self.registry.len(),
            waiting: self.queue.len(),
            rooms: self.rooms.len(),
        }
    }

    pub(crate) fn set_idle(&mut self, id: &ConnectionId) {
        if let Some(conn) = self.registry.get_mut(id) {
            conn.state = ConnectionState::Idle;
            conn.room = None;
        }
    }
}

#[cfg(test)]
pub(crate) fn messages_to(outbound: &[Outbound], id: &ConnectionId) -> Vec<ServerMessage> {
    outbound
        .iter()
        .filter(|o| o.to == *id)
        .map(|o| o.message.clone())
        .collect()
}
