//! System endpoints: welcome message, health check, and the 404 fallback.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::ServerPhase;
use crate::error::ApiError;

/// Body of `GET /`.
pub const WELCOME_MESSAGE: &str = "Welcome to TECHSNACC backend!";

/// `GET /` — Plain-text welcome message.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Welcome message",
    responses(
        (status = 200, description = "Service is up", body = String, content_type = "text/plain"),
    )
)]
pub async fn root_handler() -> &'static str {
    WELCOME_MESSAGE
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    phase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    listen_addr: Option<String>,
    database: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Reports the server phase and whether the document store answers a ping.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Document store unreachable", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let phase = state.lifecycle.phase();
    let listen_addr = match phase {
        ServerPhase::Listening { addr } => Some(addr.to_string()),
        ServerPhase::Starting | ServerPhase::Terminated => None,
    };
    let (status_code, status, database) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "healthy", "up"),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
        }
    };
    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            phase: phase.as_str().to_string(),
            listen_addr,
            database: database.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}
