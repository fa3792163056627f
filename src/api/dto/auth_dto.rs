//! Session DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// Response body for `GET /api/auth/session`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Whether the request carried a session cookie.
    pub authenticated: bool,
}
