//! Error types with HTTP status code mapping.
//!
//! [`ApiError`] is the request-scoped error type: each variant maps to an
//! HTTP status code and a structured JSON body. [`StartupError`] covers the
//! failures that stop the process before (or instead of) serving.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::ConfigError;
use crate::domain::{Collection, DocumentId, LifecycleError};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "product 3f0c… not found"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Request-scoped error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category           | HTTP Status                  |
/// |-----------|--------------------|------------------------------|
/// | 1000–1999 | Validation         | 400 / 413 / 415 / 422        |
/// | 2000–2999 | Not Found / Auth   | 404 Not Found / 401          |
/// | 3000–3999 | Server             | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request body could not be read or deserialized as JSON.
    #[error("malformed request body: {message}")]
    MalformedBody {
        /// Status chosen by the JSON extractor (400, 413, 415 or 422).
        status: StatusCode,
        /// Parser diagnostic.
        message: String,
    },

    /// Path segment is not a document id.
    #[error("invalid document id: {0}")]
    InvalidDocumentId(String),

    /// No document with this id in the collection.
    #[error("{collection} {id} not found")]
    DocumentNotFound {
        /// Collection that was searched.
        collection: Collection,
        /// Requested id.
        id: DocumentId,
    },

    /// No route matched the request path.
    #[error("no route for {0}")]
    RouteNotFound(String),

    /// The request carries no session cookie.
    #[error("not authenticated")]
    Unauthenticated,

    /// Document store failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::MalformedBody { .. } => 1002,
            Self::InvalidDocumentId(_) => 1003,
            Self::DocumentNotFound { .. } => 2001,
            Self::RouteNotFound(_) => 2002,
            Self::Unauthenticated => 2101,
            Self::Persistence(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidDocumentId(_) => StatusCode::BAD_REQUEST,
            Self::MalformedBody { status, .. } => *status,
            Self::DocumentNotFound { .. } | Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        (status, axum::Json(body)).into_response()
    }
}

/// Failures that terminate the process during startup or serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration could not be loaded or validated.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The single connection attempt to the document store failed.
    #[error("failed to connect to database: {0}")]
    DatabaseConnect(String),

    /// The connection attempt did not resolve within the configured bound.
    #[error("database connection timed out after {0:?}")]
    DatabaseTimeout(std::time::Duration),

    /// The route table violates its invariants.
    #[error("invalid route table: {0}")]
    RouteTable(#[from] crate::api::RouteTableError),

    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: std::net::SocketAddr,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The server loop exited with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// An illegal phase transition was requested.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
