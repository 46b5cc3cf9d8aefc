//! Data Transfer Objects
//!
//! Response types for the API endpoints. The ingest request decodes
//! straight into [`crate::store::Measurement`], so there is no separate
//! request DTO for it.

use serde::Serialize;

/// History read response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// `[time, x, y, z]` tuples, newest first
    pub measurements: Vec<[f64; 4]>,
    /// Total number of measurements received
    pub total: usize,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Number of measurements held in memory
    pub history_len: usize,
    /// Number of connected live viewers
    pub subscribers: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
