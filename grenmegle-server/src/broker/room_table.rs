use crate::error::BrokerError;
use grenmegle_core::{ConnectionId, Role, RoomId};
use std::collections::HashMap;

/// An active pairing of exactly two connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub initiator: ConnectionId,
    pub receiver: ConnectionId,
}

impl Room {
    pub fn members(&self) -> [ConnectionId; 2] {
        [self.initiator, self.receiver]
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.initiator == *id || self.receiver == *id
    }

    /// The other member, or `None` if `id` is not in this room.
    pub fn partner_of(&self, id: &ConnectionId) -> Option<ConnectionId> {
        if self.initiator == *id {
            Some(self.receiver)
        } else if self.receiver == *id {
            Some(self.initiator)
        } else {
            None
        }
    }

    pub fn role_of(&self, id: &ConnectionId) -> Option<Role> {
        if self.initiator == *id {
            Some(Role::Initiator)
        } else if self.receiver == *id {
            Some(Role::Receiver)
        } else {
            None
        }
    }
}

/// Owns every active room and indexes which room each member is in.
#[derive(Debug, Default)]
pub struct RoomTable {
    rooms: HashMap<RoomId, Room>,
    membership: HashMap<ConnectionId, RoomId>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forms a room. Fails if the two ids are equal, if either is already in a room,
    /// or if the derived id is taken.
    pub fn create(
        &mut self,
        initiator: ConnectionId,
        receiver: ConnectionId,
    ) -> Result<RoomId, BrokerError> {
        if initiator == receiver {
            return Err(BrokerError::SelfMatch(initiator));
        }
        for member in [initiator, receiver] {
            if self.membership.contains_key(&member) {
                return Err(BrokerError::AlreadyInRoom(member));
            }
        }

        let id = RoomId::derive(&receiver, &initiator);
        if self.rooms.contains_key(&id) {
            return Err(BrokerError::RoomExists(id));
        }

        self.membership.insert(initiator, id.clone());
        self.membership.insert(receiver, id.clone());
        self.rooms.insert(
            id.clone(),
            Room {
                id: id.clone(),
                initiator,
                receiver,
            },
        );
        Ok(id)
    }

    pub fn lookup(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn room_of(&self, member: &ConnectionId) -> Option<&RoomId> {
        self.membership.get(member)
    }

    /// Removes the room and its membership entries. Destroying an absent room is a no-op.
    pub fn destroy(&mut self, id: &RoomId) -> Option<Room> {
        let room = self.rooms.remove(id)?;
        for member in room.members() {
            self.membership.remove(&member);
        }
        Some(room)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
