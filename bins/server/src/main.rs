//! Blobgate API Server
//!
//! Main entry point for the blob storage gateway service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blobgate_api::{AppState, create_router};
use blobgate_core::gateway::BlobGateway;
use blobgate_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blobgate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Create the storage gateway
    let gateway = BlobGateway::new(&config.storage)
        .map_err(|e| anyhow::anyhow!("failed to create storage gateway: {e}"))?;
    info!(
        account = %config.storage.account,
        container = %config.storage.container,
        "Storage gateway configured"
    );

    // Create application state
    let state = AppState {
        gateway: Arc::new(gateway),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
