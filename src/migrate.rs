use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::DbConfig;
use crate::db;

/// Create the schema on an open pool. Idempotent.
pub async fn migrate_pool(pool: &SqlitePool) -> Result<()> {
    // One table for every collection; bodies are JSON text
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            id TEXT PRIMARY KEY,
            collection TEXT NOT NULL,
            body_json TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn run_migrations(db: &DbConfig) -> Result<()> {
    let pool = db::connect(db).await?;
    migrate_pool(&pool).await?;
    pool.close().await;
    Ok(())
}
