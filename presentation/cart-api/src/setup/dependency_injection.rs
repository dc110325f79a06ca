use std::sync::Arc;

use tokio::sync::Mutex;

use coupons::client::CouponApiClient;
use coupons::verifier::CouponVerifierHttp;
use logger::TracingLogger;
use persistence::cart::storage::CartStorageSqlite;

use business::application::cart::store::CartStore;
use business::application::cart::verify_coupon::VerifyCouponUseCaseImpl;
use business::domain::cart::storage::CartStorage;

use crate::config::coupon_config::CouponConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub cart_api: crate::api::cart::routes::CartApi,
}

impl DependencyContainer {
    pub async fn new(pool: sqlx::SqlitePool, coupons: &CouponConfig) -> anyhow::Result<Self> {
        let logger = Arc::new(TracingLogger);

        // Infrastructure adapters
        let storage: Arc<dyn CartStorage> = Arc::new(CartStorageSqlite::new(pool));
        let coupon_client = CouponApiClient::new(coupons.base_url.clone(), coupons.api_key.clone());
        let coupon_verifier = Arc::new(CouponVerifierHttp::new(coupon_client));

        // Cart session, restored from the storage slot
        let store = CartStore::load(storage.clone(), logger.clone()).await;

        // Use cases
        let verify_coupon_use_case = Arc::new(VerifyCouponUseCaseImpl {
            verifier: coupon_verifier,
            logger,
        });

        let health_api = crate::api::health::routes::Api::new(storage);
        let cart_api = crate::api::cart::routes::CartApi::new(
            Arc::new(Mutex::new(store)),
            verify_coupon_use_case,
        );

        Ok(Self {
            health_api,
            cart_api,
        })
    }
}
