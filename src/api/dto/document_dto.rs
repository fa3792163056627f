//! Document list DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use super::PaginationMeta;
use crate::domain::Document;

/// Response body for `GET {prefix}` on a collection.
#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentListResponse {
    /// Documents on the requested page, oldest first.
    pub data: Vec<Document>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
