// Fresco - upload a building photo, segment it, repaint it.

use fresco_core::ServerConfig;
use fresco_engine::{QuadrantMaskGenerator, SegmentationService};
use fresco_server::http::{create_router, ApiState};
use fresco_store::ImageStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    info!("🚀 Starting Fresco...");

    let config = ServerConfig::from_env();

    info!("📦 Initializing image store at {:?}...", config.upload_dir);
    let store = Arc::new(ImageStore::new(&config.upload_dir)?);
    info!("✅ Image store ready");

    // Placeholder quadrant segmentation; a real model plugs in behind the
    // same MaskGenerator seam.
    let generator = Arc::new(QuadrantMaskGenerator::new());
    let service = Arc::new(SegmentationService::new(store.clone(), generator));

    let state = ApiState { service, store };
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("✅ HTTP server listening on http://{}", addr);
    info!("🎯 Fresco is ready! Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Fresco stopped. Goodbye!");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
