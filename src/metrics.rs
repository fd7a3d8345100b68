//! Prometheus metrics definitions for herakles-irq-exporter.
//!
//! All metric names are prefixed with a configurable namespace (`node` by
//! default) so the series line up with the upstream node exporter.

use prometheus::{CounterVec, Gauge, GaugeVec, Opts, Registry};

/// Label values of the label-less filefd gauge vecs.
const NO_LABELS: &[&str] = &[];

use crate::collectors::filefd::FILE_FD_KEYS;
use crate::sanitize::sanitize_metric_name;

/// Default metric namespace.
pub const DEFAULT_NAMESPACE: &str = "node";

/// Label names of the interrupt counters.
pub const INTERRUPT_LABEL_NAMES: [&str; 4] = ["cpu", "type", "info", "devices"];

/// Collection of registered Prometheus metrics.
#[derive(Clone)]
pub struct ExporterMetrics {
    pub interrupts_total: CounterVec, // labels: cpu, type, info, devices
    pub filefd: Vec<(String, GaugeVec)>, // (stat key, label-less gauge)

    // ========== Scrape Bookkeeping ==========
    pub scrape_collector_success: GaugeVec, // labels: collector
    pub scrape_collector_duration_seconds: GaugeVec, // labels: collector
}

impl ExporterMetrics {
    /// Creates and registers all metrics with the registry.
    pub fn new(registry: &Registry, namespace: &str) -> Result<Self, prometheus::Error> {
        let ns = sanitize_metric_name(namespace);

        let interrupts_total = CounterVec::new(
            Opts::new(format!("{ns}_interrupts_total"), "Interrupt details."),
            &INTERRUPT_LABEL_NAMES,
        )?;

        let mut filefd = Vec::with_capacity(FILE_FD_KEYS.len());
        for key in FILE_FD_KEYS {
            let gauge = GaugeVec::new(
                Opts::new(
                    format!("{ns}_filefd_{}", sanitize_metric_name(key)),
                    format!("File descriptor statistics: {key}."),
                ),
                NO_LABELS,
            )?;
            filefd.push((key.to_string(), gauge));
        }

        let scrape_collector_success = GaugeVec::new(
            Opts::new(
                format!("{ns}_scrape_collector_success"),
                "Whether a collector succeeded.",
            ),
            &["collector"],
        )?;
        let scrape_collector_duration_seconds = GaugeVec::new(
            Opts::new(
                format!("{ns}_scrape_collector_duration_seconds"),
                "Duration of a collector scrape.",
            ),
            &["collector"],
        )?;

        registry.register(Box::new(interrupts_total.clone()))?;
        for (_, gauge) in &filefd {
            registry.register(Box::new(gauge.clone()))?;
        }
        registry.register(Box::new(scrape_collector_success.clone()))?;
        registry.register(Box::new(scrape_collector_duration_seconds.clone()))?;

        Ok(Self {
            interrupts_total,
            filefd,
            scrape_collector_success,
            scrape_collector_duration_seconds,
        })
    }

    /// Gauge for a file descriptor stat key, if one is registered.
    ///
    /// The series is created on first access and exposed until the next
    /// [`reset_scrape_metrics`](Self::reset_scrape_metrics).
    pub fn filefd_gauge(&self, key: &str) -> Option<Gauge> {
        self.filefd
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, vec)| vec.with_label_values(NO_LABELS))
    }

    /// Drops all per-scrape series so stale or missing values disappear.
    pub fn reset_scrape_metrics(&self) {
        self.interrupts_total.reset();
        for (_, vec) in &self.filefd {
            vec.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::{Encoder, TextEncoder};

    fn encode(registry: &Registry) -> String {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&registry.gather(), &mut buffer)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn has_sample(output: &str, metric: &str) -> bool {
        output
            .lines()
            .any(|line| line.starts_with(&format!("{metric} ")))
    }

    #[test]
    fn test_metric_names_use_namespace() {
        let registry = Registry::new();
        let metrics = ExporterMetrics::new(&registry, "node").unwrap();
        metrics.filefd_gauge("allocated").unwrap().set(1024.0);
        metrics
            .scrape_collector_success
            .with_label_values(&["filefd"])
            .set(1.0);

        let output = encode(&registry);
        assert!(output.contains("node_filefd_allocated 1024"));
        assert!(!has_sample(&output, "node_filefd_maximum"));
        assert!(output.contains("node_scrape_collector_success{collector=\"filefd\"} 1"));
    }

    #[test]
    fn test_namespace_is_sanitized() {
        let registry = Registry::new();
        let metrics = ExporterMetrics::new(&registry, "my-host.exporter").unwrap();
        metrics.filefd_gauge("maximum").unwrap().set(10.0);

        let output = encode(&registry);
        assert!(output.contains("my_host_exporter_filefd_maximum 10"));
    }

    #[test]
    fn test_double_registration_fails() {
        let registry = Registry::new();
        ExporterMetrics::new(&registry, "node").unwrap();
        assert!(ExporterMetrics::new(&registry, "node").is_err());
    }

    #[test]
    fn test_reset_drops_interrupt_series() {
        let registry = Registry::new();
        let metrics = ExporterMetrics::new(&registry, "node").unwrap();
        metrics
            .interrupts_total
            .with_label_values(&["0", "LOC", "Local timer interrupts", ""])
            .inc_by(5.0);
        assert!(encode(&registry).contains("node_interrupts_total{"));

        metrics.reset_scrape_metrics();
        assert!(!encode(&registry).contains("node_interrupts_total{"));
    }

    #[test]
    fn test_filefd_absent_until_set() {
        let registry = Registry::new();
        let _metrics = ExporterMetrics::new(&registry, "node").unwrap();

        let output = encode(&registry);
        assert!(!has_sample(&output, "node_filefd_allocated"));
        assert!(!has_sample(&output, "node_filefd_maximum"));
    }

    #[test]
    fn test_reset_drops_filefd_series() {
        let registry = Registry::new();
        let metrics = ExporterMetrics::new(&registry, "node").unwrap();
        metrics.filefd_gauge("allocated").unwrap().set(1024.0);
        assert!(has_sample(&encode(&registry), "node_filefd_allocated"));

        metrics.reset_scrape_metrics();
        assert!(!has_sample(&encode(&registry), "node_filefd_allocated"));
    }
}
