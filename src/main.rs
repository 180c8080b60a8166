use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use moviebox::common::clock::SystemClock;
use moviebox::config::settings::AppConfig;
use moviebox::infrastructure::storage::{KeyValueStore, MemoryStore, RedisStore};
use moviebox::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting server...");

    let config = AppConfig::new().context("AUTH_JWT_SECRET and ADMIN_EMAIL must be set")?;

    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => Arc::new(
            RedisStore::new(url)
                .await
                .context("Failed to connect to Redis")?,
        ),
        None => {
            warn!("REDIS_URL not set, collections will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let port = config.server_port;
    let state = AppState::new(config, store, Arc::new(SystemClock)).await;
    tokio::spawn(moviebox::workers::janitor::start_janitor(state.clone()));
    let app = moviebox::app::create_app(state).await;

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
