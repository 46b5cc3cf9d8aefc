//! Liveplot Server
//!
//! Run with: cargo run --bin liveplot
//!
//! # Configuration
//!
//! Loaded from a TOML file (see `--config`) with environment overrides:
//! - `LIVEPLOT_HOST`: Host to bind to (default: 0.0.0.0)
//! - `LIVEPLOT_PORT`: Port to listen on (default: 8080)
//! - `LIVEPLOT_MAX_CONNECTIONS`: Viewer connection limit (default: 1000)
//! - `LIVEPLOT_LOG_LEVEL`: Log level when `RUST_LOG` is unset (default: info)
//! - `LIVEPLOT_LOG_FORMAT`: `pretty` or `json` (default: pretty)
//! - `RUST_LOG`: Full filter override, takes precedence over the level above

use clap::Parser;
use liveplot::api::{serve, ApiConfig, AppState};
use liveplot::config::{generate_default_config, Config, LoggingConfig};
use liveplot::ws::HubConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "liveplot", version, about = "Live measurement server")]
struct Args {
    /// Path to a TOML config file (default locations searched otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Override the port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Print a default config file to stdout and exit
    #[arg(long)]
    generate_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.generate_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    // Config is loaded before the subscriber so [logging] can shape it
    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config.logging);

    tracing::info!("Starting Liveplot v{}", env!("CARGO_PKG_VERSION"));

    let api_config = ApiConfig::new(config.server.host.clone(), config.server.port);
    let hub_config = HubConfig {
        max_connections: config.hub.max_connections,
    };

    tracing::info!("Viewer connection limit: {}", hub_config.max_connections);

    let state = AppState::with_hub_config(api_config.clone(), hub_config);

    serve(state, &api_config).await?;

    tracing::info!("Liveplot stopped");
    Ok(())
}

/// Install the tracing subscriber per the logging config.
///
/// `RUST_LOG` overrides the configured level; the format knob picks the
/// pretty or JSON fmt layer.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(logging.directives()));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
