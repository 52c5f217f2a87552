//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for blob operations
//! - Response types and error mapping
//! - The shared application state

pub mod routes;

use axum::Router;
use blobgate_core::gateway::BlobGateway;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Blob storage gateway, one per process.
    pub gateway: Arc<BlobGateway>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
