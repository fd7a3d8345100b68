//! Metrics endpoint handler for Prometheus scraping.
//!
//! Every request runs all enabled collectors against fresh procfs snapshots
//! and returns the registry in the Prometheus text format.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use herakles_irq_exporter::scrape;
use prometheus::{Encoder, TextEncoder};
use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::state::SharedState;

/// Buffer capacity for metrics encoding.
const BUFFER_CAP: usize = 64 * 1024;

/// Error type for metrics endpoint failures.
#[derive(Debug)]
pub enum MetricsError {
    EncodingFailed,
}

impl IntoResponse for MetricsError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to encode metrics",
        )
            .into_response()
    }
}

/// Handler for the /metrics endpoint.
#[instrument(skip(state))]
pub async fn metrics_handler(State(state): State<SharedState>) -> Result<String, MetricsError> {
    let start = Instant::now();
    debug!("Processing /metrics request");

    let _guard = state.scrape_lock.lock().await;

    let failures = scrape(&state.collectors, &state.metrics);
    if failures > 0 {
        debug!("{} collector(s) failed during scrape", failures);
    }

    state.scrape_duration.set(start.elapsed().as_secs_f64());

    let mut buffer = Vec::with_capacity(BUFFER_CAP);
    let encoder = TextEncoder::new();
    encoder
        .encode(&state.registry.gather(), &mut buffer)
        .map_err(|e| {
            error!("Failed to encode metrics: {}", e);
            MetricsError::EncodingFailed
        })?;

    String::from_utf8(buffer).map_err(|e| {
        error!("Metrics output is not valid UTF-8: {}", e);
        MetricsError::EncodingFailed
    })
}
