//! Feed Message Format
//!
//! The hub pushes exactly one message per publish: `{ "result": <json> }`
//! where `result` is the JSON-encoded array of `[time, x, y, z]` tuples,
//! newest first. The array is pre-encoded into a string once per publish
//! so the serialization cost is paid once, not per subscriber.

use serde::Serialize;

use crate::store::Measurement;

/// One live-feed push: the full history at the moment of publish.
#[derive(Debug, Clone, Serialize)]
pub struct FeedMessage {
    /// JSON-encoded array of `[time, x, y, z]` tuples, newest first
    pub result: String,
}

impl FeedMessage {
    /// Encode a history snapshot into its wire form.
    pub fn from_snapshot(snapshot: &[Measurement]) -> Result<Self, serde_json::Error> {
        let tuples: Vec<[f64; 4]> = snapshot.iter().map(Measurement::as_tuple).collect();
        Ok(Self {
            result: serde_json::to_string(&tuples)?,
        })
    }
}

/// Sent once when a connection is rejected before registration.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReject {
    /// Reason the connection was refused
    pub error: String,
}
