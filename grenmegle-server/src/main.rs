use anyhow::{Context, Result};
use clap::Parser;
use grenmegle_server::{BrokerHandle, ServerConfig, router, start};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    info!("Initializing Grenmegle server...");

    let (state, broker_task) = start(&config);
    let app = router(state.clone());

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Grenmegle server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state.broker.clone()))
        .await
        .context("server error")?;

    broker_task.await.context("broker task failed")?;
    info!("Grenmegle server stopped");
    Ok(())
}

/// Waits for Ctrl-C, then stops the broker so open sockets get closed and the server can drain.
async fn shutdown_signal(broker: BrokerHandle) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");

    if let Err(e) = broker.shutdown().await {
        warn!("Broker already stopped: {}", e);
    }
}
