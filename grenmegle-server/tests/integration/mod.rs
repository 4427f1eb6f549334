pub mod matching_tests;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::Level;

use grenmegle_server::{AppState, BrokerHandle, BrokerState, ServerConfig, router, start};

use crate::utils::{Captured, MockSignalingOutput};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_broker() -> (
    BrokerHandle,
    mpsc::UnboundedReceiver<Captured>,
    MockSignalingOutput,
) {
    let (signaling, captured_rx) = MockSignalingOutput::new();
    let (broker, _task) = BrokerHandle::spawn(BrokerState::new(), Arc::new(signaling.clone()), 100);

    (broker, captured_rx, signaling)
}

/// Serves the full router on an ephemeral localhost port.
pub async fn spawn_test_server() -> (SocketAddr, Arc<AppState>) {
    let config = ServerConfig {
        command_buffer: 100,
        ..ServerConfig::default()
    };
    let (state, _task) = start(&config);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    (addr, state)
}
