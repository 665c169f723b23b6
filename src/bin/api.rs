//! Eventdash API Server
//!
//! Run with: cargo run --bin eventdash-api
//!
//! # Configuration
//!
//! Settings come from the first config file found in
//! `~/.config/eventdash/config.toml`, `/etc/eventdash/config.toml` or
//! `./config.toml`, with environment overrides:
//! - `EVENTDASH_DATA_DIR`: Data directory
//! - `EVENTDASH_API_HOST` / `EVENTDASH_API_PORT`: Bind address (default: 0.0.0.0:8082)
//! - `EVENTDASH_UPLOAD_DIR`: Image upload directory (default: <data_dir>/uploads)
//! - `EVENTDASH_ACCESS_CODE`: Team access code required at login
//! - `EVENTDASH_LOG_LEVEL`, `EVENTDASH_LOG_FORMAT`: Logging (pretty or json)
//! - `RUST_LOG`: Full filter directive, takes precedence over the log level

use eventdash::api::{serve, AppState};
use eventdash::config::{Config, LoggingConfig};
use eventdash::store::Store;
use eventdash::uploads::UploadStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = Config::load_default();

    init_tracing(&loaded.config.logging);
    loaded.log_outcome();
    let config = loaded.config;

    tracing::info!("Starting Eventdash API server v{}", env!("CARGO_PKG_VERSION"));

    let data_dir = config.data_dir();
    tracing::info!("Data directory: {:?}", data_dir);

    // Initialize store
    let store = Arc::new(Store::open(&data_dir)?);
    let purged = store.purge_expired_sessions(chrono::Utc::now()).await?;
    if purged > 0 {
        tracing::info!("Purged {} expired sessions", purged);
    }

    let members = store.list_members().await?;
    if members.is_empty() {
        tracing::warn!("No members registered; add one with `eventdash-cli members add`");
    } else {
        tracing::info!("{} members registered", members.len());
    }

    // Initialize upload storage
    let uploads = Arc::new(UploadStore::new(config.upload_config())?);
    tracing::info!("Upload directory: {:?}", uploads.dir());

    let auth = config.session_config();
    if auth.access_code.is_empty() {
        tracing::warn!("No access code configured; members sign in with their email only");
    }

    let api_config = config.server_config();
    let state = AppState::new(Arc::clone(&store), uploads, auth, api_config.clone());

    // Run server
    tracing::info!("Starting server on {}:{}", api_config.host, api_config.port);
    serve(state, &api_config).await?;

    tracing::info!("Eventdash API server stopped");

    Ok(())
}

/// Initialize tracing from the logging config
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("eventdash={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
