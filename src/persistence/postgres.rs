//! PostgreSQL implementation of the document store.
//!
//! Documents live in a single `documents` table keyed by UUID, with the
//! collection name as a discriminator and the body stored as JSONB.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::DocumentStore;
use crate::config::DatabaseConfig;
use crate::domain::{Collection, Document, DocumentId, DocumentPage};
use crate::error::{ApiError, StartupError};

type DocumentRow = (Uuid, serde_json::Value, DateTime<Utc>, DateTime<Utc>);

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS documents (\
     id UUID PRIMARY KEY, \
     collection TEXT NOT NULL, \
     body JSONB NOT NULL, \
     created_at TIMESTAMPTZ NOT NULL, \
     updated_at TIMESTAMPTZ NOT NULL)";

const CREATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS documents_collection_created_idx \
     ON documents (collection, created_at, id)";

/// PostgreSQL-backed document store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Makes the single bounded connection attempt and prepares the schema.
    ///
    /// The whole attempt, including schema creation, must finish within
    /// `config.connect_timeout`. There is no retry.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError::DatabaseConnect`] if the driver reports a
    /// failure and [`StartupError::DatabaseTimeout`] if the bound elapses.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StartupError> {
        let attempt = async {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(config.connect_timeout)
                .connect(&config.url)
                .await?;
            let store = Self::new(pool);
            store.ensure_schema().await?;
            Ok::<_, sqlx::Error>(store)
        };

        match tokio::time::timeout(config.connect_timeout, attempt).await {
            Ok(Ok(store)) => Ok(store),
            Ok(Err(e)) => Err(StartupError::DatabaseConnect(e.to_string())),
            Err(_) => Err(StartupError::DatabaseTimeout(config.connect_timeout)),
        }
    }

    /// Creates the `documents` table and its listing index if absent.
    ///
    /// # Errors
    ///
    /// Returns the driver error on failure.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_INDEX).execute(&self.pool).await?;
        Ok(())
    }
}

fn to_document(collection: Collection, row: DocumentRow) -> Document {
    let (id, body, created_at, updated_at) = row;
    Document {
        id: DocumentId::from_uuid(id),
        collection,
        body,
        created_at,
        updated_at,
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn ping(&self) -> Result<(), ApiError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(
        &self,
        collection: Collection,
        body: serde_json::Value,
    ) -> Result<Document, ApiError> {
        let doc = Document::new(collection, body);
        sqlx::query(
            "INSERT INTO documents (id, collection, body, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(*doc.id.as_uuid())
        .bind(collection.as_str())
        .bind(&doc.body)
        .bind(doc.created_at)
        .bind(doc.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn get(&self, collection: Collection, id: DocumentId) -> Result<Document, ApiError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body, created_at, updated_at FROM documents \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| to_document(collection, r))
            .ok_or(ApiError::DocumentNotFound { collection, id })
    }

    async fn list(
        &self,
        collection: Collection,
        offset: u64,
        limit: u64,
    ) -> Result<DocumentPage, ApiError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents WHERE collection = $1",
        )
        .bind(collection.as_str())
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body, created_at, updated_at FROM documents \
             WHERE collection = $1 ORDER BY created_at, id LIMIT $2 OFFSET $3",
        )
        .bind(collection.as_str())
        .bind(to_i64(limit))
        .bind(to_i64(offset))
        .fetch_all(&self.pool)
        .await?;

        Ok(DocumentPage {
            items: rows
                .into_iter()
                .map(|r| to_document(collection, r))
                .collect(),
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn replace(
        &self,
        collection: Collection,
        id: DocumentId,
        body: serde_json::Value,
    ) -> Result<Document, ApiError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "UPDATE documents SET body = $3, updated_at = $4 \
             WHERE collection = $1 AND id = $2 \
             RETURNING id, body, created_at, updated_at",
        )
        .bind(collection.as_str())
        .bind(*id.as_uuid())
        .bind(&body)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| to_document(collection, r))
            .ok_or(ApiError::DocumentNotFound { collection, id })
    }

    async fn delete(&self, collection: Collection, id: DocumentId) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::DocumentNotFound { collection, id });
        }
        Ok(())
    }

    async fn export(&self, collection: Collection) -> Result<Vec<Document>, ApiError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body, created_at, updated_at FROM documents \
             WHERE collection = $1 ORDER BY created_at, id",
        )
        .bind(collection.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| to_document(collection, r))
            .collect())
    }
}
