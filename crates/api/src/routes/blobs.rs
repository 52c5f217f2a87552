//! Blob operation routes: upload, download, delete, rename.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use blobgate_core::gateway::{GatewayError, RenameOutcome};

use crate::AppState;

/// Creates the blob operation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_blob))
        .route("/download", get(download_blob))
        .route("/delete", delete(delete_blob))
        .route("/rename", put(rename_blob))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for uploading a blob.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// Blob name.
    #[serde(default)]
    pub name: String,
    /// Base64-encoded payload.
    #[serde(default)]
    pub data: String,
}

/// Query parameters naming a single blob.
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    /// Blob name.
    pub name: Option<String>,
}

/// Query parameters for a rename.
#[derive(Debug, Deserialize)]
pub struct RenameQuery {
    /// Current blob name.
    pub name: Option<String>,
    /// New blob name.
    pub target: Option<String>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Maps a gateway error to its JSON error response.
fn error_response(err: &GatewayError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "status": err.status_code(),
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/upload`
/// Store a base64 payload under the given name.
async fn upload_blob(
    State(state): State<AppState>,
    Json(payload): Json<UploadRequest>,
) -> impl IntoResponse {
    match state.gateway.put(&payload.name, &payload.data).await {
        Ok(()) => {
            info!(name = %payload.name, "Blob uploaded");
            (
                StatusCode::CREATED,
                Json(json!({ "status": 201, "message": "Created" })),
            )
                .into_response()
        }
        Err(e) => {
            error!(name = %payload.name, error = %e, "Failed to upload blob");
            error_response(&e)
        }
    }
}

/// GET `/download?name=`
/// Fetch a blob as base64 text.
async fn download_blob(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> impl IntoResponse {
    let name = query.name.unwrap_or_default();

    match state.gateway.get(&name).await {
        Ok(data) => {
            info!(name = %name, "Blob downloaded");
            (
                StatusCode::OK,
                Json(json!({ "status": 200, "message": "Ok", "data": data })),
            )
                .into_response()
        }
        Err(e) => {
            error!(name = %name, error = %e, "Failed to download blob");
            error_response(&e)
        }
    }
}

/// DELETE `/delete?name=`
/// Remove a blob.
async fn delete_blob(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> impl IntoResponse {
    let name = query.name.unwrap_or_default();

    match state.gateway.delete(&name).await {
        Ok(()) => {
            info!(name = %name, "Blob deleted");
            (
                StatusCode::OK,
                Json(json!({ "status": 200, "message": "Ok" })),
            )
                .into_response()
        }
        Err(e) => {
            error!(name = %name, error = %e, "Failed to delete blob");
            error_response(&e)
        }
    }
}

/// PUT `/rename?name=&target=`
/// Rename `name` to `target` via copy-then-delete-source.
async fn rename_blob(
    State(state): State<AppState>,
    Query(query): Query<RenameQuery>,
) -> impl IntoResponse {
    let name = query.name.unwrap_or_default();
    let target = query.target.unwrap_or_default();

    match state.gateway.copy_and_delete_source(&name, &target).await {
        Ok(outcome) => {
            match outcome {
                RenameOutcome::Renamed => info!(name = %name, target = %target, "Blob renamed"),
                RenameOutcome::AlreadyRenamed => {
                    info!(name = %name, target = %target, "Blob rename already completed");
                }
            }
            (
                StatusCode::OK,
                Json(json!({ "status": 200, "message": "Ok" })),
            )
                .into_response()
        }
        Err(e) => {
            error!(name = %name, target = %target, error = %e, "Failed to rename blob");
            error_response(&e)
        }
    }
}
