//! Trailing-slash normalisation for handler-group paths.
//!
//! `/api/product/` and `/api/product` reach the same handler. Only paths
//! under `/api/` are rewritten; Swagger UI redirects `/swagger-ui` to
//! `/swagger-ui/` and must see the slash.
//!
//! This runs before routing, so it wraps the finished [`Router`] as a
//! service instead of being added with `Router::layer`.

use axum::Router;
use axum::extract::Request;
use axum::http::Uri;
use axum::http::uri::PathAndQuery;
use tower::util::MapRequest;

/// Prefix shared by every handler group.
const API_PREFIX: &str = "/api/";

/// The served application: the router behind path normalisation.
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// Wraps a router whose state is attached in path normalisation.
#[must_use]
pub fn normalize(router: Router) -> App {
    MapRequest::new(router, trim_trailing_slash as fn(Request) -> Request)
}

/// Strips trailing slashes from `/api/...` paths, keeping the query.
#[must_use]
pub fn trim_trailing_slash(mut request: Request) -> Request {
    if let Some(uri) = trimmed(request.uri()) {
        *request.uri_mut() = uri;
    }
    request
}

fn trimmed(uri: &Uri) -> Option<Uri> {
    let path = uri.path();
    if !path.starts_with(API_PREFIX) || !path.ends_with('/') {
        return None;
    }
    let path = path.trim_end_matches('/');
    let rebuilt = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(rebuilt).ok()?);
    Uri::from_parts(parts).ok()
}
