use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use grenmegle_core::{ConnectionId, ServerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

#[derive(Default)]
struct SignalingInner {
    peers: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// WebSocket side of the broker: one outbound channel per live socket.
#[derive(Clone, Default)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_peer(&self, connection_id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(connection_id, tx);
    }

    pub fn remove_peer(&self, connection_id: &ConnectionId) {
        self.inner.peers.remove(connection_id);
    }

    pub fn peer_count(&self) -> usize {
        self.inner.peers.len()
    }

    pub fn send_message(&self, connection_id: ConnectionId, msg: &ServerMessage) {
        let Some(peer) = self.inner.peers.get(&connection_id) else {
            warn!(
                "Attempted to send to disconnected connection {}",
                connection_id
            );
            return;
        };

        match serde_json::to_string(msg) {
            Ok(json) => {
                if let Err(e) = peer.send(Message::Text(json.into())) {
                    error!("Failed to send WS message to {}: {:?}", connection_id, e);
                }
            }
            Err(e) => error!("Failed to serialize server message: {}", e),
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send(&self, to: ConnectionId, message: ServerMessage) {
        self.send_message(to, &message);
    }

    async fn close(&self, connection_id: ConnectionId) {
        let Some((_, peer)) = self.inner.peers.remove(&connection_id) else {
            return;
        };
        debug!("Closing connection {}", connection_id);
        let _ = peer.send(Message::Close(None));
    }
}
