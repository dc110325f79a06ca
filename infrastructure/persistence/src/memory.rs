use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use business::domain::cart::storage::CartStorage;
use business::domain::errors::RepositoryError;

/// Process-local slot storage for tests and throwaway sessions.
#[derive(Default)]
pub struct InMemoryCartStorage {
    slots: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStorage for InMemoryCartStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, RepositoryError> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| RepositoryError::persistence())?;
        Ok(slots.get(key).cloned())
    }

    async fn write(&self, key: &str, blob: &[u8]) -> Result<(), RepositoryError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| RepositoryError::persistence())?;
        slots.insert(key.to_string(), blob.to_vec());
        Ok(())
    }
}
