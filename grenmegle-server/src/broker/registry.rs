use grenmegle_core::{ConnectionId, ConnectionState, RoomId};
use std::collections::HashMap;

/// One live client session as the broker sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub state: ConnectionState,
    /// Back-reference to the room this connection is in. The room itself is owned by the room table.
    pub room: Option<RoomId>,
}

impl Connection {
    fn new(id: ConnectionId) -> Self {
        Self {
            id,
            state: ConnectionState::Idle,
            room: None,
        }
    }
}

/// Every currently connected client, keyed by id.
#[derive(Debug, Default)]
pub struct Registry {
    connections: HashMap<ConnectionId, Connection>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh id and records it as `idle`.
    pub fn register(&mut self) -> ConnectionId {
        let id = ConnectionId::new();
        self.connections.insert(id, Connection::new(id));
        id
    }

    /// Drops the record only. Queue and room cleanup belong to the lifecycle handler.
    pub fn remove(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.connections.remove(id)
    }

    pub fn exists(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &ConnectionId) -> Option<&mut Connection> {
        self.connections.get_mut(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ConnectionId> {
        self.connections.keys()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
