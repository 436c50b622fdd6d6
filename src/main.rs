//! brewhouse service entry point.

use anyhow::{Context, Result};
use brewhouse::api::{self, AppState};
use brewhouse::catalog::Catalog;
use brewhouse::orders::PgOrderStore;
use brewhouse::{Config, Server};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "brewhouse=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(?config, "starting brewhouse");

    let orders = PgOrderStore::connect(
        &config.database_url,
        config.max_connections,
        config.request_timeout.unwrap_or(DEFAULT_ACQUIRE_TIMEOUT),
    )
    .await
    .context("Failed to connect to the order datastore")?;

    let state = AppState::new(Catalog::seeded(), orders);
    let mut app = api::router(state);
    if let Some(limit) = config.request_timeout {
        app = app.timeout(limit);
    }

    Server::bind(config.addr())
        .serve(app)
        .await
        .context("Server error")?;

    Ok(())
}
