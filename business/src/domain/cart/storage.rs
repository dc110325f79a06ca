use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

/// Fixed slot the cart snapshot lives under.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Durable blob storage for the cart snapshot (device-local).
#[async_trait]
pub trait CartStorage: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, RepositoryError>;
    async fn write(&self, key: &str, blob: &[u8]) -> Result<(), RepositoryError>;
}
