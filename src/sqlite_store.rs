//! SQLite-backed [`DocumentStore`] implementation.
//!
//! Every collection shares the `documents` table created by
//! [`migrate`](crate::migrate); the collection name is a column and the
//! document body is stored as JSON text.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::SqlitePool;

use kollny_core::store::{stamp_timestamps, DocumentStore};

use crate::config::DbConfig;
use crate::{db, migrate};

pub struct SqliteStore {
    pool: SqlitePool,
    name: String,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool, name: impl Into<String>) -> Self {
        Self {
            pool,
            name: name.into(),
        }
    }

    /// Connect to the configured database and ensure the schema exists.
    pub async fn open(config: &DbConfig) -> Result<Self> {
        let pool = db::connect(config).await?;
        migrate::migrate_pool(&pool).await?;
        Ok(Self::new(pool, config.display_name()))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Number of documents stored in `collection`.
    pub async fn count(&self, collection: &str) -> Result<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = ?")
            .bind(collection)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create_document(&self, collection: &str, document: &Value) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now();
        let body = stamp_timestamps(document, now);
        let ts = now.timestamp();

        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body_json, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(collection)
        .bind(serde_json::to_string(&body)?)
        .bind(ts)
        .bind(ts)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT collection FROM documents ORDER BY collection")
                .fetch_all(&self.pool)
                .await?;
        Ok(names)
    }
}
