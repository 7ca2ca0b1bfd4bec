use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;

use super::{AppState, create_router};

/// Bind `addr` and serve until Ctrl-C.
pub async fn run_server(state: AppState, addr: &str) -> anyhow::Result<()> {
    let router = create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local: SocketAddr = listener.local_addr()?;
    tracing::info!(%local, "SPBE API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with an error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
