//! Synthetic Measurement Generator
//!
//! Run with: cargo run --bin liveplot-generator
//!
//! Produces a noisy sinusoid sweep and POSTs one measurement every 500 ms
//! to a running liveplot server. Useful for exercising the live feed
//! without real sensor hardware.
//!
//! Environment variables:
//! - `LIVEPLOT_URL`: Ingest endpoint (default: http://localhost:8080/api/v1/measurements)

use liveplot::store::Measurement;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "liveplot_generator=info".into()),
        )
        .init();

    let url = std::env::var("LIVEPLOT_URL")
        .unwrap_or_else(|_| "http://localhost:8080/api/v1/measurements".to_string());

    tracing::info!("Sending measurements to {}", url);

    let client = reqwest::Client::new();
    let mut t = 0.0_f64;

    while t < 10.0 {
        let measurement = Measurement::new(
            t,
            5.0 * t.cos() + noise(),
            6.0 * t.sin() + noise(),
            noise(),
        );

        match client.post(&url).json(&measurement).send().await {
            Ok(response) => {
                tracing::info!(
                    time = measurement.time,
                    status = %response.status(),
                    "Measurement sent"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to send measurement");
            }
        }

        tokio::time::sleep(Duration::from_millis(500)).await;
        t += 0.1;
    }

    tracing::info!("Generator sweep complete");
    Ok(())
}

/// Clock-derived pseudo-random noise in [-1.0, 1.0)
fn noise() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    ((nanos % 1000) as f64 / 1000.0) * 2.0 - 1.0
}
