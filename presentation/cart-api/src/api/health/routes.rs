use std::sync::Arc;

use chrono::Utc;
use poem_openapi::{Object, OpenApi, payload::Json};
use serde::{Deserialize, Serialize};

use business::domain::cart::storage::{CART_STORAGE_KEY, CartStorage};

use crate::api::tags::ApiTags;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct HealthCheckResponse {
    /// "healthy", or "degraded" when the cart storage cannot be read
    pub status: String,
    /// Whether the cart storage slot answered
    pub storage: bool,
    /// Current server timestamp
    pub timestamp: String,
    /// Service version
    pub version: String,
}

pub struct Api {
    storage: Arc<dyn CartStorage>,
}

impl Api {
    pub fn new(storage: Arc<dyn CartStorage>) -> Self {
        Self { storage }
    }
}

#[OpenApi]
impl Api {
    /// Health check endpoint
    ///
    /// Probes the cart storage slot and reports the service version.
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health_check(&self) -> Json<HealthCheckResponse> {
        let storage = self.storage.read(CART_STORAGE_KEY).await.is_ok();
        Json(HealthCheckResponse {
            status: (if storage { "healthy" } else { "degraded" }).to_string(),
            storage,
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}
