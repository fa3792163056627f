//! Backup export DTOs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Document;

/// Response body for `GET /api/backup`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BackupResponse {
    /// When the export was taken.
    pub generated_at: DateTime<Utc>,
    /// Number of documents across all collections.
    pub document_count: usize,
    /// Documents keyed by collection name.
    pub collections: BTreeMap<String, Vec<Document>>,
}
