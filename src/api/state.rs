//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::store::MeasurementStore;
use crate::ws::{BroadcastHub, HubConfig};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Shared application state for all handlers
pub struct AppState {
    /// Measurement history owner
    pub store: Arc<MeasurementStore>,
    /// Live feed fan-out hub
    pub hub: Arc<BroadcastHub>,
    /// Serializes the append→publish sequence: successive publishes reach
    /// subscribers in history order, so a viewer never sees the history
    /// shrink. Publish only does non-blocking sends, so holding this
    /// cannot stall on a slow subscriber.
    pub ingest_lock: Mutex<()>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with a default hub configuration
    pub fn new(config: ApiConfig) -> Self {
        Self::with_hub_config(config, HubConfig::default())
    }

    /// Create AppState with custom hub configuration
    pub fn with_hub_config(config: ApiConfig, hub_config: HubConfig) -> Self {
        Self {
            store: Arc::new(MeasurementStore::new()),
            hub: Arc::new(BroadcastHub::new(hub_config)),
            ingest_lock: Mutex::new(()),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
