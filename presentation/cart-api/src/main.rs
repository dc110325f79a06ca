use dotenvy::dotenv;

mod api;
mod config;
mod setup;

use config::{app_config::AppConfig, storage_config};
use setup::{dependency_injection::DependencyContainer, server::Server};

/// Cart service entry point
///
/// Restores the device cart from local storage, wires the coupon
/// verification adapter and serves the cart over HTTP.
/// - config/: Application configuration (server, CORS, storage, coupons)
/// - setup/: Dependency injection and server setup
/// - api/: Route handlers and DTOs
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Open the cart storage
    let pool = storage_config::init_storage().await?;

    // 5. Wire dependencies
    let container = DependencyContainer::new(pool, &config.coupons).await?;

    // 6. Run server
    Server::run(config.server, config.cors, container).await?;

    Ok(())
}
