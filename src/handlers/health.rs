use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::info;

use crate::models::{HealthResponse, StorageHealth};
use crate::state::AppState;

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let configured = state.fetcher.is_configured();
    let status = if configured { "healthy" } else { "degraded" };

    info!(status = status, storage_configured = configured, "Health check completed");

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        storage: StorageHealth {
            configured,
            bucket: state.fetcher.bucket().to_string(),
        },
    })
}

/// Readiness check endpoint
pub async fn ready_handler(State(state): State<AppState>) -> StatusCode {
    if state.fetcher.is_configured() {
        StatusCode::OK
    } else {
        info!("Readiness check failed - storage not configured");
        StatusCode::SERVICE_UNAVAILABLE
    }
}
