use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("database.connection_error")]
    ConnectionError,
    #[error("database.schema_error")]
    SchemaError,
}

/// Configuration for the local SQLite store
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default values.
    /// One connection: the cart has a single writer, and `sqlite::memory:`
    /// databases only live as long as their connection.
    pub fn new(connection_string: String) -> Self {
        Self {
            connection_string,
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Creates a SQLite connection pool
pub async fn create_sqlite_pool(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(&config.connection_string)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "could not open cart database");
            DatabaseError::ConnectionError
        })?;

    Ok(pool)
}

/// Creates the key/value table holding storage slots
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DatabaseError> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY NOT NULL,
            value BLOB NOT NULL,
            updated_at TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "could not create kv_store table");
        DatabaseError::SchemaError
    })?;

    Ok(())
}
