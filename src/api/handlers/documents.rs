//! Document CRUD handlers shared by every collection group.
//!
//! Each collection prefix mounts [`routes`] with its [`Collection`] carried
//! in a request extension, so one set of handlers serves all nine groups.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};

use crate::api::dto::{DocumentListResponse, PaginationParams};
use crate::api::extract::JsonBody;
use crate::app_state::AppState;
use crate::domain::document::ensure_object;
use crate::domain::{Collection, Document, DocumentId};
use crate::error::{ApiError, ErrorResponse};

fn parse_id(raw: &str) -> Result<DocumentId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::InvalidDocumentId(raw.to_string()))
}

/// `GET {prefix}` — List documents with pagination.
///
/// # Errors
///
/// Returns [`ApiError::Persistence`] on store failure.
#[utoipa::path(
    get,
    path = "/api/{collection}",
    tag = "Documents",
    summary = "List documents",
    description = "Returns a page of documents from the collection, oldest first.",
    params(
        ("collection" = Collection, Path, description = "Collection name"),
        PaginationParams,
    ),
    responses(
        (status = 200, description = "Paginated document list", body = DocumentListResponse),
    )
)]
pub async fn list_documents(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let params = params.clamped();
    let page = state
        .store
        .list(collection, params.offset(), u64::from(params.per_page))
        .await?;

    Ok(Json(DocumentListResponse {
        data: page.items,
        pagination: params.meta(page.total),
    }))
}

/// `POST {prefix}` — Create a document.
///
/// # Errors
///
/// Returns [`ApiError::MalformedBody`] for unparsable JSON and
/// [`ApiError::InvalidRequest`] when the body is not an object.
#[utoipa::path(
    post,
    path = "/api/{collection}",
    tag = "Documents",
    summary = "Create a document",
    description = "Stores the JSON object body as a new document.",
    params(("collection" = Collection, Path, description = "Collection name")),
    request_body = Object,
    responses(
        (status = 201, description = "Document created", body = Document),
        (status = 400, description = "Malformed or non-object body", body = ErrorResponse),
    )
)]
pub async fn create_document(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    JsonBody(body): JsonBody<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_object(&body)?;
    let doc = state.store.insert(collection, body).await?;
    tracing::info!(collection = %collection, id = %doc.id, "document created");
    Ok((StatusCode::CREATED, Json(doc)))
}

/// `GET {prefix}/{id}` — Fetch a document.
///
/// # Errors
///
/// Returns [`ApiError::InvalidDocumentId`] or
/// [`ApiError::DocumentNotFound`].
#[utoipa::path(
    get,
    path = "/api/{collection}/{id}",
    tag = "Documents",
    summary = "Get a document",
    params(
        ("collection" = Collection, Path, description = "Collection name"),
        ("id" = uuid::Uuid, Path, description = "Document UUID"),
    ),
    responses(
        (status = 200, description = "Document", body = Document),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
    )
)]
pub async fn get_document(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get(collection, id).await?))
}

/// `PUT {prefix}/{id}` — Replace a document body.
///
/// # Errors
///
/// Returns [`ApiError::InvalidDocumentId`], [`ApiError::MalformedBody`],
/// [`ApiError::InvalidRequest`] or [`ApiError::DocumentNotFound`].
#[utoipa::path(
    put,
    path = "/api/{collection}/{id}",
    tag = "Documents",
    summary = "Replace a document",
    params(
        ("collection" = Collection, Path, description = "Collection name"),
        ("id" = uuid::Uuid, Path, description = "Document UUID"),
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Updated document", body = Document),
        (status = 400, description = "Invalid id or body", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
    )
)]
pub async fn replace_document(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    ensure_object(&body)?;
    Ok(Json(state.store.replace(collection, id, body).await?))
}

/// `DELETE {prefix}/{id}` — Delete a document.
///
/// # Errors
///
/// Returns [`ApiError::InvalidDocumentId`] or
/// [`ApiError::DocumentNotFound`].
#[utoipa::path(
    delete,
    path = "/api/{collection}/{id}",
    tag = "Documents",
    summary = "Delete a document",
    params(
        ("collection" = Collection, Path, description = "Collection name"),
        ("id" = uuid::Uuid, Path, description = "Document UUID"),
    ),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 404, description = "Document not found", body = ErrorResponse),
    )
)]
pub async fn delete_document(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete(collection, id).await?;
    tracing::info!(collection = %collection, id = %id, "document deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Document routes for one collection, relative to its prefix.
pub fn routes(collection: Collection) -> Router<AppState> {
    Router::new()
        .route("/", get(list_documents).post(create_document))
        .route(
            "/{id}",
            get(get_document)
                .put(replace_document)
                .delete(delete_document),
        )
        .layer(Extension(collection))
}
