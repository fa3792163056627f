//! Session endpoints backed by the `token` cookie.
//!
//! Issuing and verifying tokens belongs to the identity provider; these
//! handlers only read and clear the cookie.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;

use crate::api::dto::SessionResponse;
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};

/// Cookie that carries the session token.
pub const SESSION_COOKIE: &str = "token";

/// `GET /api/auth/session` — Report whether a session cookie is present.
///
/// # Errors
///
/// Returns [`ApiError::Unauthenticated`] when the cookie is missing or empty.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "Auth",
    summary = "Session status",
    responses(
        (status = 200, description = "Session cookie present", body = SessionResponse),
        (status = 401, description = "No session cookie", body = ErrorResponse),
    )
)]
pub async fn session(jar: CookieJar) -> Result<impl IntoResponse, ApiError> {
    jar.get(SESSION_COOKIE)
        .filter(|cookie| !cookie.value().is_empty())
        .ok_or(ApiError::Unauthenticated)?;
    Ok(Json(SessionResponse {
        authenticated: true,
    }))
}

/// `POST /api/auth/logout` — Clear the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    summary = "Log out",
    responses(
        (status = 204, description = "Session cookie cleared"),
    )
)]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let expired = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (StatusCode::NO_CONTENT, jar.remove(expired))
}

/// Auth routes, relative to `/api/auth`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(session))
        .route("/logout", post(logout))
}
