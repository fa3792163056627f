//! Shared application state injected into all Axum handlers.

use crate::domain::Lifecycle;
use crate::persistence::SharedStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Only constructed once the document store is connected, so every handler
/// runs against a live store handle.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Document store shared by all requests.
    pub store: SharedStore,
    /// Server phase, reported by the health endpoint.
    pub lifecycle: Lifecycle,
}

impl AppState {
    /// Bundles a connected store with the lifecycle handle.
    #[must_use]
    pub fn new(store: SharedStore, lifecycle: Lifecycle) -> Self {
        Self { store, lifecycle }
    }
}
