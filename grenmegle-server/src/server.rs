use crate::broker::{BrokerHandle, BrokerState};
use crate::config::ServerConfig;
use crate::signaling::{SignalingService, ws_handler};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};

/// Shared by every WebSocket handler.
pub struct AppState {
    pub signaling: SignalingService,
    pub broker: BrokerHandle,
}

/// Spawns the broker wired to a fresh [`SignalingService`].
pub fn start(config: &ServerConfig) -> (Arc<AppState>, JoinHandle<()>) {
    let signaling = SignalingService::new();
    let (broker, task) = BrokerHandle::spawn(
        BrokerState::new(),
        Arc::new(signaling.clone()),
        config.command_buffer,
    );

    (Arc::new(AppState { signaling, broker }), task)
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state)
}
