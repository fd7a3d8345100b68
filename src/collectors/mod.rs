//! Collectors module for kernel counters.
//!
//! Each collector reads one procfs snapshot per update and pushes the
//! resulting observations into a [`MetricSink`]. Nothing is cached between
//! updates.

use std::time::Instant;

use tracing::{debug, warn};

use crate::error::CollectError;
use crate::metrics::ExporterMetrics;
use crate::sink::{MetricSink, Observation, PrometheusSink};

pub mod filefd;
pub mod interrupts;

/// A source of metric observations.
pub trait Collector: Send + Sync {
    /// Collector name, used as the `collector` label of the scrape metrics.
    fn name(&self) -> &'static str;

    /// Reads a fresh snapshot and emits its observations.
    fn update(&self, sink: &mut dyn MetricSink) -> Result<(), CollectError>;
}

/// Runs all collectors into the registered metrics.
///
/// Each collector's observations are buffered and only written when its
/// update succeeds, so a failing collector exposes none of its series. The
/// failure is logged and reported through `scrape_collector_success`; the
/// remaining collectors still run. Returns the number of failed collectors.
pub fn scrape(collectors: &[Box<dyn Collector>], metrics: &ExporterMetrics) -> usize {
    metrics.reset_scrape_metrics();

    let mut failures = 0;
    for collector in collectors {
        let name = collector.name();
        let start = Instant::now();
        let mut observations: Vec<Observation> = Vec::new();

        let success = match collector.update(&mut observations) {
            Ok(()) => {
                debug!(
                    "collector {} succeeded with {} observations",
                    name,
                    observations.len()
                );
                let mut sink = PrometheusSink::new(metrics);
                for observation in observations {
                    sink.emit(observation);
                }
                1.0
            }
            Err(e) => {
                warn!("collector {} failed: {}", name, e);
                failures += 1;
                0.0
            }
        };

        metrics
            .scrape_collector_duration_seconds
            .with_label_values(&[name])
            .set(start.elapsed().as_secs_f64());
        metrics
            .scrape_collector_success
            .with_label_values(&[name])
            .set(success);
    }

    failures
}
