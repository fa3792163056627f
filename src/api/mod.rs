//! REST API layer: route table, handlers, DTOs, and router composition.
//!
//! Handler groups are mounted under the prefixes of [`RouteTable`]; system
//! endpoints (`/`, `/health`) and the OpenAPI document sit at the root.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod route_table;

pub use route_table::{HandlerGroup, RouteTable, RouteTableError};

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router for the given route table.
///
/// Requests that match no route get a JSON 404.
pub fn build_router(table: &RouteTable) -> Router<AppState> {
    let router = table
        .entries()
        .iter()
        .fold(Router::new(), |router, &(prefix, group)| {
            router.nest(prefix, group.routes())
        });

    router
        .merge(handlers::system::routes())
        .merge(crate::openapi::routes())
        .fallback(handlers::system::not_found)
}
