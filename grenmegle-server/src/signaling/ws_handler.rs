use crate::broker::BrokerHandle;
use crate::error::BrokerError;
use crate::server::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use grenmegle_core::{ClientMessage, ConnectionId, ServerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = match state.broker.register().await {
        Ok(id) => id,
        Err(e) => {
            error!("Failed to register connection: {}", e);
            return;
        }
    };
    info!("New WebSocket connection: {}", connection_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.add_peer(connection_id, tx);
    state
        .signaling
        .send_message(connection_id, &ServerMessage::Welcome { connection_id });

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sender.send(msg).await.is_err() || closing {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let broker = state.broker.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(client_msg) => {
                            if let Err(e) = forward(&broker, connection_id, client_msg).await {
                                error!("Broker died: {}", e);
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid message from {}: {}", connection_id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    if let Err(e) = state.broker.disconnect(connection_id).await {
        warn!("Could not report disconnect of {}: {}", connection_id, e);
    }
    state.signaling.remove_peer(&connection_id);
    info!("WebSocket disconnected: {}", connection_id);
}

async fn forward(
    broker: &BrokerHandle,
    connection_id: ConnectionId,
    msg: ClientMessage,
) -> Result<(), BrokerError> {
    match msg {
        ClientMessage::FindPartner => broker.find_partner(connection_id).await,
        ClientMessage::Signal(signal) => broker.signal(connection_id, signal).await,
        ClientMessage::LeaveRoom(leave) => {
            broker
                .leave_room(connection_id, leave.room_id().clone())
                .await
        }
    }
}
