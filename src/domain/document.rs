//! Stored document record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Collection, DocumentId};
use crate::error::ApiError;

/// A schema-less record in one collection.
///
/// `body` is always a JSON object; the store never interprets its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Document {
    /// Document identifier (immutable after creation).
    pub id: DocumentId,
    /// Owning collection.
    pub collection: Collection,
    /// Client-supplied JSON object.
    #[schema(value_type = Object)]
    pub body: serde_json::Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last replace.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Creates a fresh document with a new id and both timestamps set to now.
    #[must_use]
    pub fn new(collection: Collection, body: serde_json::Value) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            collection,
            body,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One page of documents plus the collection size.
#[derive(Debug, Clone)]
pub struct DocumentPage {
    /// Documents on this page, oldest first.
    pub items: Vec<Document>,
    /// Total number of documents in the collection.
    pub total: u64,
}

/// Rejects bodies that are not JSON objects.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] for arrays, scalars and `null`.
pub fn ensure_object(body: &serde_json::Value) -> Result<(), ApiError> {
    if body.is_object() {
        Ok(())
    } else {
        Err(ApiError::InvalidRequest(
            "document body must be a JSON object".to_string(),
        ))
    }
}
