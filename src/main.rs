use std::sync::Arc;

use anyhow::{Context, Result};
use aptos_readable::{aptos_client::AptosClient, config::Config, handlers};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // RUST_LOG wins over LOG_LEVEL when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Aptos Readable server...");
    info!("Loaded config: {:?}", config);

    let client = AptosClient::new(&config).context("Failed to build Aptos client")?;
    let app = handlers::router(Arc::new(client), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    info!("Server running on http://{}", config.bind_addr);
    info!("API endpoint: http://{}/api/explain", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
