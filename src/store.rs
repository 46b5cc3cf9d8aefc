//! Measurement Store
//!
//! Owns the in-memory history of received measurements. The history is
//! append-only and ordered newest-first: every append inserts at the front,
//! so index 0 is always the most recent sample. Readers get an immutable
//! snapshot copy and never observe a partially applied append.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// One timestamped sensor sample.
///
/// Decoded from the ingest payload as a JSON object; the live feed encodes
/// it as a `[time, x, y, z]` tuple instead (see [`Measurement::as_tuple`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Sample timestamp (producer-defined units, typically seconds)
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Measurement {
    pub fn new(time: f64, x: f64, y: f64, z: f64) -> Self {
        Self { time, x, y, z }
    }

    /// The feed wire form: `[time, x, y, z]`.
    pub fn as_tuple(&self) -> [f64; 4] {
        [self.time, self.x, self.y, self.z]
    }
}

/// In-memory history of all received measurements, newest first.
///
/// `append` takes the write lock, `snapshot` the read lock: a snapshot is
/// always a fully consistent view, and concurrent readers do not serialize
/// against each other.
pub struct MeasurementStore {
    history: RwLock<Vec<Measurement>>,
}

impl MeasurementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            history: RwLock::new(Vec::new()),
        }
    }

    /// Insert a measurement at the front of the history.
    ///
    /// The history is unbounded; nothing is ever evicted or reordered.
    pub async fn append(&self, m: Measurement) {
        let mut history = self.history.write().await;
        history.insert(0, m);

        tracing::debug!(
            time = m.time,
            total = history.len(),
            "Measurement appended"
        );
    }

    /// Append a measurement and return the resulting snapshot under a
    /// single write-lock acquisition.
    ///
    /// The returned snapshot always has `m` at the front: no other append
    /// can slot in between the insert and the copy.
    pub async fn append_and_snapshot(&self, m: Measurement) -> Vec<Measurement> {
        let mut history = self.history.write().await;
        history.insert(0, m);

        tracing::debug!(
            time = m.time,
            total = history.len(),
            "Measurement appended"
        );

        history.clone()
    }

    /// Point-in-time copy of the full history, newest first.
    pub async fn snapshot(&self) -> Vec<Measurement> {
        self.history.read().await.clone()
    }

    /// Number of measurements received so far.
    pub async fn len(&self) -> usize {
        self.history.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.history.read().await.is_empty()
    }
}

impl Default for MeasurementStore {
    fn default() -> Self {
        Self::new()
    }
}
