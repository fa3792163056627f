//! Whole-store export.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::BackupResponse;
use crate::app_state::AppState;
use crate::domain::Collection;
use crate::error::{ApiError, ErrorResponse};

/// `GET /api/backup` — Export every collection as one JSON document.
///
/// # Errors
///
/// Returns [`ApiError::Persistence`] if any collection cannot be read.
#[utoipa::path(
    get,
    path = "/api/backup",
    tag = "Backup",
    summary = "Export all documents",
    responses(
        (status = 200, description = "Export of every collection", body = BackupResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn export_backup(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let mut collections = BTreeMap::new();
    for collection in Collection::ALL {
        let docs = state.store.export(collection).await?;
        collections.insert(collection.as_str().to_string(), docs);
    }
    let document_count = collections.values().map(Vec::len).sum();
    tracing::info!(document_count, "backup exported");

    Ok(Json(BackupResponse {
        generated_at: Utc::now(),
        document_count,
        collections,
    }))
}

/// Backup routes, relative to `/api/backup`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(export_backup))
}
