use persistence::db::{DatabaseConfig, create_sqlite_pool, ensure_schema};
use sqlx::SqlitePool;
use std::env;

const DEFAULT_CART_DATABASE_URL: &str = "sqlite://cart.db?mode=rwc";

/// Open the device-local cart database and make sure its table exists
///
/// Environment variables:
/// - CART_DATABASE_URL: SQLite connection string (default: "sqlite://cart.db?mode=rwc")
pub async fn init_storage() -> anyhow::Result<SqlitePool> {
    let db_url =
        env::var("CART_DATABASE_URL").unwrap_or_else(|_| DEFAULT_CART_DATABASE_URL.to_string());
    let pool = create_sqlite_pool(&DatabaseConfig::new(db_url)).await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}
