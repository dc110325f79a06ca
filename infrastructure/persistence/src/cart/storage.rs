use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use business::domain::cart::storage::CartStorage;
use business::domain::errors::RepositoryError;

/// Cart slot stored as one row of the `kv_store` table.
pub struct CartStorageSqlite {
    pool: SqlitePool,
}

impl CartStorageSqlite {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartStorage for CartStorageSqlite {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, RepositoryError> {
        sqlx::query_scalar::<_, Vec<u8>>("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, key, "failed to read storage slot");
                RepositoryError::database_error()
            })
    }

    async fn write(&self, key: &str, blob: &[u8]) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(blob)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, key, "failed to write storage slot");
            RepositoryError::database_error()
        })?;

        tracing::debug!(key, bytes = blob.len(), "storage slot written");
        Ok(())
    }
}
