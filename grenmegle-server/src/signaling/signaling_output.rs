use async_trait::async_trait;
use grenmegle_core::{ConnectionId, ServerMessage};

/// What the broker needs from a client transport: push a message, or hang up.
///
/// Both calls are fire-and-forget. Delivery failures stay on the transport side.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Queue `message` for delivery to `to`, preserving send order per connection.
    async fn send(&self, to: ConnectionId, message: ServerMessage);

    /// Close the client's channel.
    async fn close(&self, connection_id: ConnectionId);
}
