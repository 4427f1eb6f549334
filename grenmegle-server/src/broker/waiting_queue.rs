use grenmegle_core::ConnectionId;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// FIFO of connections waiting for a partner. An id is present at most once.
#[derive(Debug, Default)]
pub struct WaitingQueue {
    order: VecDeque<ConnectionId>,
    members: HashSet<ConnectionId>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` to the tail. Returns `false` if it was already waiting.
    pub fn enqueue(&mut self, id: ConnectionId) -> bool {
        if !self.members.insert(id) {
            return false;
        }
        self.order.push_back(id);
        true
    }

    /// Pops the oldest entry for which `is_live` holds. Dead entries met on the way are discarded.
    pub fn dequeue_oldest<F>(&mut self, is_live: F) -> Option<ConnectionId>
    where
        F: Fn(&ConnectionId) -> bool,
    {
        while let Some(id) = self.order.pop_front() {
            self.members.remove(&id);
            if is_live(&id) {
                return Some(id);
            }
            debug!("Pruned stale queue entry {}", id);
        }
        None
    }

    pub fn remove(&mut self, id: &ConnectionId) -> bool {
        if !self.members.remove(id) {
            return false;
        }
        self.order.retain(|queued| queued != id);
        true
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.members.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConnectionId> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
