//! # Middleware Chain
//!
//! Tower layers wrapped around the API router, outermost first:
//! - [`path`]: trailing-slash normalisation, applied around the router by
//!   [`crate::server`] since it must run before routing.
//! - [`cors`]: credentialed allow-list gate.
//! - request tracing with `TraceLayer`, tagged with the handler group.
//! - per-request timeout.
//! - JSON body size limit.
//!
//! Body deserialization and cookie parsing run as extractors
//! ([`crate::api::extract::JsonBody`] and `axum_extra`'s `CookieJar`), so a
//! malformed body is rejected before the handler body executes.

pub mod cors;
pub mod path;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Request};
use axum::http::StatusCode;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api::RouteTable;
use crate::app_state::AppState;
use crate::config::{ConfigError, ServerConfig};

/// Wraps `router` in the middleware chain.
///
/// Needs no database: the chain is pure configuration.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the CORS allow-list cannot be turned into
/// header values.
pub fn apply(
    router: Router<AppState>,
    config: &ServerConfig,
    table: &RouteTable,
) -> Result<Router<AppState>, ConfigError> {
    let cors = cors::cors_layer(&config.cors)?;

    let spans = table.clone();
    let trace = TraceLayer::new_for_http().make_span_with(move |request: &Request| {
        let group = spans
            .resolve(request.uri().path())
            .map_or("system", |group| group.name());
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
            group,
        )
    });

    Ok(router
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(trace)
        .layer(cors))
}
