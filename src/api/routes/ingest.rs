//! Ingest Route
//!
//! Endpoint for receiving measurements from producers.
//!
//! - POST /api/v1/measurements - Single measurement
//!
//! Decoding happens explicitly from the raw body so a malformed payload is
//! a first-class [`ApiError::Decode`] rather than an extractor rejection,
//! and neither the store nor the hub is touched on failure.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::Measurement;

/// POST /api/v1/measurements
///
/// Ingest a single measurement: decode, append to the history, and push
/// the updated snapshot to every connected viewer. The accepted
/// measurement is echoed back to the producer.
pub async fn ingest_measurement(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Measurement>)> {
    let measurement: Measurement =
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

    // One producer at a time through append→publish: a later, longer
    // snapshot can never reach subscribers before an earlier, shorter one.
    let _ingest = state.ingest_lock.lock().await;

    let snapshot = state.store.append_and_snapshot(measurement).await;

    // Fan out synchronously: every subscriber registered at this point
    // sees the history up to and including this measurement.
    let delivered = state.hub.publish(&snapshot).await;

    tracing::debug!(
        time = measurement.time,
        history_len = snapshot.len(),
        delivered,
        "Measurement ingested"
    );

    Ok((StatusCode::OK, Json(measurement)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::ApiConfig;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_ingest_appends_and_echoes() {
        let state = Arc::new(AppState::new(ApiConfig::default()));
        let body = Bytes::from(r#"{"time": 0.5, "x": 1.0, "y": 2.0, "z": 3.0}"#);

        let (status, Json(echoed)) = ingest_measurement(State(Arc::clone(&state)), body)
            .await
            .unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(echoed, Measurement::new(0.5, 1.0, 2.0, 3.0));
        assert_eq!(state.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_ingest_decode_error_leaves_state_untouched() {
        let state = Arc::new(AppState::new(ApiConfig::default()));

        // A registered viewer must not see a publish for a rejected payload
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.hub.subscribe(tx).await.unwrap();

        let body = Bytes::from(r#"{"time": 1, "x": "abc", "y": 2, "z": 3}"#);
        let result = ingest_measurement(State(Arc::clone(&state)), body).await;

        assert!(matches!(result, Err(ApiError::Decode(_))));
        assert!(state.store.is_empty().await);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_concurrent_ingest_never_shrinks_viewer_history() {
        let state = Arc::new(AppState::new(ApiConfig::default()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.hub.subscribe(tx).await.unwrap();

        let mut tasks = Vec::new();
        for i in 0..20 {
            let state = Arc::clone(&state);
            tasks.push(tokio::spawn(async move {
                let body = Bytes::from(format!(
                    r#"{{"time": {}.0, "x": 0.0, "y": 0.0, "z": 0.0}}"#,
                    i
                ));
                ingest_measurement(State(state), body).await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        // Each successive push must carry a strictly longer history
        let mut last_len = 0;
        while let Ok(msg) = rx.try_recv() {
            let decoded: Vec<[f64; 4]> = serde_json::from_str(&msg.result).unwrap();
            assert!(
                decoded.len() > last_len,
                "viewer saw history shrink: {} then {} measurements",
                last_len,
                decoded.len()
            );
            last_len = decoded.len();
        }
        assert_eq!(last_len, 20);
    }

    #[tokio::test]
    async fn test_ingest_publishes_to_viewers() {
        let state = Arc::new(AppState::new(ApiConfig::default()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.hub.subscribe(tx).await.unwrap();

        let body = Bytes::from(r#"{"time": 0.0, "x": 5.0, "y": 0.0, "z": 0.0}"#);
        ingest_measurement(State(Arc::clone(&state)), body)
            .await
            .unwrap();

        let msg = rx.try_recv().unwrap();
        let decoded: Vec<[f64; 4]> = serde_json::from_str(&msg.result).unwrap();
        assert_eq!(decoded, vec![[0.0, 5.0, 0.0, 0.0]]);
    }
}
