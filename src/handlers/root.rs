//! Root endpoint handler for the landing page.

use axum::{extract::State, response::IntoResponse};
use std::path::Path;
use tracing::{debug, instrument};

use crate::state::SharedState;

/// Footer text for human-readable HTTP endpoints.
pub const FOOTER_TEXT: &str = "Project: https://github.com/cansp-dev/herakles-irq-exporter | More info: https://www.herakles.now | Support: exporter@herakles.now";

/// Handler for the root `/` endpoint.
#[instrument(skip(state))]
pub async fn root_handler(State(state): State<SharedState>) -> impl IntoResponse {
    debug!("Processing / request");

    let names: Vec<&str> = state.collectors.iter().map(|c| c.name()).collect();
    let procfs = state.config.procfs();
    render_root_page(&names, procfs.root(), state.start_time.elapsed().as_secs())
}

/// Renders the plain text landing page.
fn render_root_page(collectors: &[&str], procfs: &Path, uptime_secs: u64) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let built = env!("VERGEN_BUILD_TIMESTAMP");

    let hours = uptime_secs / 3600;
    let minutes = (uptime_secs % 3600) / 60;
    let seconds = uptime_secs % 60;

    let collectors: String = collectors
        .iter()
        .map(|name| format!("  - {name}\n"))
        .collect();

    format!(
        "Herakles IRQ Exporter {version} (built {built})\n\
         Uptime: {hours}h {minutes}m {seconds}s\n\
         procfs: {procfs}\n\
         \n\
         Collectors:\n\
         {collectors}\
         \n\
         Endpoints:\n  \
         /metrics   Prometheus metrics\n  \
         /          This page\n\
         \n\
         {FOOTER_TEXT}\n",
        procfs = procfs.display(),
    )
}
