//! Debtscope Dashboard Server
//!
//! Run with: cargo run --bin debtscope
//!
//! # Configuration
//!
//! Read from `--config <path>`, else the first of
//! `~/.config/debtscope/config.toml`, `/etc/debtscope/config.toml`,
//! `./config.toml`. Environment variables override file values:
//! - `DEBTSCOPE_SOURCE_URL`: CSV endpoint
//! - `DEBTSCOPE_CACHE_TTL_SECS`: Dataset cache lifetime (default: 0, no cache)
//! - `DEBTSCOPE_HOST`: Host to bind to (default: 0.0.0.0)
//! - `DEBTSCOPE_PORT`: Port to listen on (default: 8501)
//! - `DEBTSCOPE_LOG_LEVEL` / `DEBTSCOPE_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter directive, takes precedence over the level

use clap::Parser;
use debtscope::api::{serve, ApiConfig, AppState};
use debtscope::config::{Config, LoggingConfig};
use debtscope::source::{CachedSource, DataSource, HttpCsvSource};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "debtscope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive dashboard of Lebanon's external debt")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging);

    tracing::info!("Starting Debtscope dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data source: {}", config.source.url);

    let http = HttpCsvSource::new(config.source.http())?;
    let source: Arc<dyn DataSource> = match config.source.cache_ttl() {
        Some(ttl) => {
            tracing::info!("Dataset cache enabled: {}s", ttl.as_secs());
            Arc::new(CachedSource::new(http, ttl))
        }
        None => {
            tracing::info!("Dataset cache disabled, fetching on every render");
            Arc::new(http)
        }
    };

    // Check the source is reachable; the server starts either way
    match source.fetch().await {
        Ok(dataset) => match dataset.bounds() {
            Some(bounds) => tracing::info!("Dataset reachable: {} rows, years {}", dataset.len(), bounds),
            None => tracing::warn!("Dataset reachable but empty"),
        },
        Err(e) => tracing::warn!("Dataset not available: {} (pages will show the error)", e),
    }

    let api_config = ApiConfig::from(&config.server);
    let state = AppState::new(source, api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("Debtscope dashboard stopped");
    Ok(())
}

/// Install the global tracing subscriber
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter_directive().into());

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
