// ABOUTME: Admin HTTP server and CLI support for the club data manager
// ABOUTME: Wires configuration, the SQLite option store and the settings manager

use std::sync::Arc;

use clubdata_settings::ClubSettingsManager;
use clubdata_storage::SqliteOptionStore;
use tracing::{info, warn};

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;


use config::Config;

/// Install the tracing subscriber, `RUST_LOG` overrides the default `info` filter
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

/// Open the configured database and build a settings manager over it
pub async fn open_manager(config: &Config) -> anyhow::Result<ClubSettingsManager> {
    let store = SqliteOptionStore::connect(&config.database_url).await?;
    Ok(ClubSettingsManager::new(Arc::new(store)))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let manager = open_manager(&config).await?;

    if config.dev_mode {
        warn!("Development mode enabled, admin endpoints are not authenticated");
    } else if config.api_token.is_none() {
        warn!("No API token configured, admin endpoints will reject every request");
    }

    let state = api::AppState::new(manager, config.api_token.clone(), config.dev_mode);
    let app = api::create_router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
