//! History Route
//!
//! - GET /api/v1/measurements - Current history snapshot, newest first

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::HistoryResponse;
use crate::api::state::AppState;
use crate::store::Measurement;

/// GET /api/v1/measurements
///
/// Return the full history as `[time, x, y, z]` tuples, newest first.
/// The same shape the live feed carries, for clients that poll instead
/// of holding a socket.
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    let snapshot = state.store.snapshot().await;
    let measurements: Vec<[f64; 4]> = snapshot.iter().map(Measurement::as_tuple).collect();
    let total = measurements.len();

    Json(HistoryResponse {
        measurements,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::ApiConfig;

    #[tokio::test]
    async fn test_history_newest_first() {
        let state = Arc::new(AppState::new(ApiConfig::default()));
        state.store.append(Measurement::new(0.0, 5.0, 0.0, 0.0)).await;
        state.store.append(Measurement::new(0.1, 4.9, 0.6, 0.1)).await;

        let Json(response) = get_history(State(state)).await;

        assert_eq!(response.total, 2);
        assert_eq!(
            response.measurements,
            vec![[0.1, 4.9, 0.6, 0.1], [0.0, 5.0, 0.0, 0.0]]
        );
    }

    #[tokio::test]
    async fn test_history_empty() {
        let state = Arc::new(AppState::new(ApiConfig::default()));
        let Json(response) = get_history(State(state)).await;
        assert_eq!(response.total, 0);
        assert!(response.measurements.is_empty());
    }
}
