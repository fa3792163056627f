//! Persistence layer: the document store behind every handler group.
//!
//! [`DocumentStore`] is the seam between HTTP handlers and storage. The
//! production implementation keeps documents as JSONB rows in PostgreSQL
//! via `sqlx::PgPool`; [`memory::MemoryDocumentStore`] backs tests and
//! local runs without a database.

pub mod memory;
pub mod postgres;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Collection, Document, DocumentId, DocumentPage};
use crate::error::ApiError;

/// Handle shared by all concurrently running requests.
pub type SharedStore = Arc<dyn DocumentStore>;

/// Storage operations over schema-less documents grouped by collection.
///
/// Implementations own their concurrency control; callers hold no locks.
/// Backend failures surface as [`ApiError::Persistence`].
#[async_trait]
pub trait DocumentStore: fmt::Debug + Send + Sync {
    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), ApiError>;

    /// Stores `body` as a new document and returns it.
    async fn insert(
        &self,
        collection: Collection,
        body: serde_json::Value,
    ) -> Result<Document, ApiError>;

    /// Fetches one document.
    ///
    /// # Errors
    ///
    /// [`ApiError::DocumentNotFound`] if `id` is not in `collection`.
    async fn get(&self, collection: Collection, id: DocumentId) -> Result<Document, ApiError>;

    /// Returns up to `limit` documents after skipping `offset`, oldest first.
    async fn list(
        &self,
        collection: Collection,
        offset: u64,
        limit: u64,
    ) -> Result<DocumentPage, ApiError>;

    /// Replaces the body of an existing document.
    ///
    /// # Errors
    ///
    /// [`ApiError::DocumentNotFound`] if `id` is not in `collection`.
    async fn replace(
        &self,
        collection: Collection,
        id: DocumentId,
        body: serde_json::Value,
    ) -> Result<Document, ApiError>;

    /// Deletes one document.
    async fn delete(&self, collection: Collection, id: DocumentId) -> Result<(), ApiError>;

    /// Returns every document of a collection, oldest first.
    async fn export(&self, collection: Collection) -> Result<Vec<Document>, ApiError>;
}
