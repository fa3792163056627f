//! In-process document store.
//!
//! Keeps each collection as an insertion-ordered `Vec` behind a single
//! [`tokio::sync::RwLock`]. Used by the test suites and for running the
//! router without PostgreSQL.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::domain::{Collection, Document, DocumentId, DocumentPage};
use crate::error::ApiError;

/// Document store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents across all collections.
    pub async fn len(&self) -> usize {
        self.collections.read().await.values().map(Vec::len).sum()
    }

    /// Returns `true` if no collection holds a document.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn ping(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn insert(
        &self,
        collection: Collection,
        body: serde_json::Value,
    ) -> Result<Document, ApiError> {
        let doc = Document::new(collection, body);
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn get(&self, collection: Collection, id: DocumentId) -> Result<Document, ApiError> {
        let map = self.collections.read().await;
        map.get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned()
            .ok_or(ApiError::DocumentNotFound { collection, id })
    }

    async fn list(
        &self,
        collection: Collection,
        offset: u64,
        limit: u64,
    ) -> Result<DocumentPage, ApiError> {
        let map = self.collections.read().await;
        let docs = map.get(&collection).map(Vec::as_slice).unwrap_or_default();
        Ok(DocumentPage {
            items: docs
                .iter()
                .skip(to_usize(offset))
                .take(to_usize(limit))
                .cloned()
                .collect(),
            total: docs.len() as u64,
        })
    }

    async fn replace(
        &self,
        collection: Collection,
        id: DocumentId,
        body: serde_json::Value,
    ) -> Result<Document, ApiError> {
        let mut map = self.collections.write().await;
        let doc = map
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or(ApiError::DocumentNotFound { collection, id })?;
        doc.body = body;
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }

    async fn delete(&self, collection: Collection, id: DocumentId) -> Result<(), ApiError> {
        let mut map = self.collections.write().await;
        let docs = map
            .get_mut(&collection)
            .ok_or(ApiError::DocumentNotFound { collection, id })?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(ApiError::DocumentNotFound { collection, id });
        }
        Ok(())
    }

    async fn export(&self, collection: Collection) -> Result<Vec<Document>, ApiError> {
        Ok(self
            .collections
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }
}
