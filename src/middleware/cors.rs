//! Credentialed CORS gate over a fixed origin allow-list.
//!
//! A request whose `Origin` is on the list gets that origin reflected in
//! `Access-Control-Allow-Origin` together with
//! `Access-Control-Allow-Credentials: true`, and its preflights get the
//! requested headers echoed back. Any other origin gets no
//! `Access-Control-Allow-Origin` header; the handler still runs and the
//! browser withholds the response.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::config::{ConfigError, CorsConfig};

/// Methods browsers may use cross-origin.
const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::PUT,
    Method::PATCH,
    Method::POST,
    Method::DELETE,
];

/// Builds the CORS layer for the configured allow-list.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOrigin`] if an origin is not a valid
/// header value.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, ConfigError> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::InvalidOrigin {
                origin: origin.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(Duration::from_secs(60 * 60)))
}
