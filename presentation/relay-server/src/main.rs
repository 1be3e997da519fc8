use dotenvy::dotenv;

mod api;
mod config;
mod setup;

use config::app_config::AppConfig;
use setup::{dependency_injection::DependencyContainer, server::Server};

/// Relay server entry point
///
/// Startup order matters: the Firestore handle is created once, before the
/// listener is bound, and handed to components through the dependency
/// container.
/// - config/: Application configuration (server, CORS, Firebase)
/// - setup/: Dependency injection and server setup
/// - api/: Route handlers
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration
    let config = AppConfig::from_env();

    // 4. Initialize the database handle and wire dependencies (fails fast)
    let container = DependencyContainer::new(&config.firebase)
        .await
        .inspect_err(|e| tracing::error!("Startup aborted: {e}"))?;

    // 5. Run server
    Server::run(config, container).await?;

    Ok(())
}
