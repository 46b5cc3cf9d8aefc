//! # Liveplot
//!
//! Live measurement server: ingests streamed sensor samples over HTTP and
//! fans the growing history out to any number of connected viewers over
//! WebSocket, in real time.
//!
//! ## Architecture
//!
//! producer → ingest endpoint → [`store::MeasurementStore`] →
//! [`ws::BroadcastHub`] → all live viewer sessions
//!
//! Every accepted measurement is appended to the front of the in-memory
//! history (newest first), and the full updated snapshot is pushed to
//! every connected viewer. History is unbounded for the process lifetime.
//!
//! ## Modules
//!
//! - [`store`]: The append-only measurement history
//! - [`ws`]: WebSocket hub, sessions, and feed message format
//! - [`api`]: HTTP server with Axum (ingest, history read, health, chart page)
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use liveplot::api::{serve, ApiConfig, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let state = AppState::new(config.clone());
//!     serve(state, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod store;
pub mod ws;

// Re-export top-level types for convenience
pub use store::{Measurement, MeasurementStore};

pub use ws::{
    BroadcastHub, FeedMessage, HubConfig, HubError, SessionReject, SubscriberId,
    websocket_handler,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig};
