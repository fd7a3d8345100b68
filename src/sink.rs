//! Metric observations and the sinks that receive them.
//!
//! Collectors push completed observations into a [`MetricSink`]. The
//! exporter uses [`PrometheusSink`], tests usually collect into a
//! `Vec<Observation>`.

use tracing::debug;

use crate::metrics::ExporterMetrics;

/// One interrupt counter for one CPU.
#[derive(Debug, Clone, PartialEq)]
pub struct InterruptObservation {
    pub value: f64,
    /// CPU index as a decimal string.
    pub cpu: String,
    /// Interrupt name, exported as the `type` label.
    pub name: String,
    pub info: String,
    pub devices: String,
}

impl InterruptObservation {
    /// Label values in the order `cpu, type, info, devices`.
    pub fn label_values(&self) -> [&str; 4] {
        [&self.cpu, &self.name, &self.info, &self.devices]
    }
}

/// One value of the file descriptor statistics (`allocated`, `maximum`).
#[derive(Debug, Clone, PartialEq)]
pub struct FileFdObservation {
    pub name: String,
    pub value: f64,
}

/// Completed data point handed to a sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    Interrupt(InterruptObservation),
    FileFd(FileFdObservation),
}

/// Receiver of completed observations.
pub trait MetricSink {
    fn emit(&mut self, observation: Observation);
}

impl MetricSink for Vec<Observation> {
    fn emit(&mut self, observation: Observation) {
        self.push(observation);
    }
}

/// Writes observations into the registered Prometheus metrics.
pub struct PrometheusSink<'a> {
    metrics: &'a ExporterMetrics,
}

impl<'a> PrometheusSink<'a> {
    pub fn new(metrics: &'a ExporterMetrics) -> Self {
        Self { metrics }
    }
}

impl MetricSink for PrometheusSink<'_> {
    fn emit(&mut self, observation: Observation) {
        match observation {
            Observation::Interrupt(obs) => {
                // Counters only go up; a negative or NaN kernel value cannot be exported.
                if obs.value.is_nan() || obs.value < 0.0 {
                    debug!(
                        "dropping unrepresentable interrupt value {} for {} on cpu {}",
                        obs.value, obs.name, obs.cpu
                    );
                    return;
                }
                let counter = self
                    .metrics
                    .interrupts_total
                    .with_label_values(&obs.label_values());
                counter.reset();
                counter.inc_by(obs.value);
            }
            Observation::FileFd(obs) => match self.metrics.filefd_gauge(&obs.name) {
                Some(gauge) => gauge.set(obs.value),
                None => debug!("no gauge registered for filefd stat {}", obs.name),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::{Encoder, Registry, TextEncoder};

    fn interrupt(value: f64) -> Observation {
        Observation::Interrupt(InterruptObservation {
            value,
            cpu: "1".to_string(),
            name: "NMI".to_string(),
            info: "Non-maskable interrupts".to_string(),
            devices: String::new(),
        })
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<Observation> = Vec::new();
        sink.emit(interrupt(1.0));
        sink.emit(Observation::FileFd(FileFdObservation {
            name: "allocated".to_string(),
            value: 1024.0,
        }));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0], interrupt(1.0));
    }

    #[test]
    fn test_prometheus_sink_sets_counter() {
        let registry = Registry::new();
        let metrics = ExporterMetrics::new(&registry, "node").unwrap();
        let mut sink = PrometheusSink::new(&metrics);

        sink.emit(interrupt(42.0));
        sink.emit(interrupt(50.0));

        let value = metrics
            .interrupts_total
            .with_label_values(&["1", "NMI", "Non-maskable interrupts", ""])
            .get();
        assert_eq!(value, 50.0);
    }

    #[test]
    fn test_prometheus_sink_drops_negative_values() {
        let registry = Registry::new();
        let metrics = ExporterMetrics::new(&registry, "node").unwrap();
        let mut sink = PrometheusSink::new(&metrics);

        sink.emit(interrupt(-3.0));
        sink.emit(interrupt(f64::NAN));

        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&registry.gather(), &mut buffer)
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(!output.contains("node_interrupts_total{"));
    }

    #[test]
    fn test_prometheus_sink_sets_filefd_gauges() {
        let registry = Registry::new();
        let metrics = ExporterMetrics::new(&registry, "node").unwrap();
        let mut sink = PrometheusSink::new(&metrics);

        sink.emit(Observation::FileFd(FileFdObservation {
            name: "maximum".to_string(),
            value: 1631329.0,
        }));
        sink.emit(Observation::FileFd(FileFdObservation {
            name: "unknown".to_string(),
            value: 1.0,
        }));

        assert_eq!(metrics.filefd_gauge("maximum").unwrap().get(), 1631329.0);
        assert!(metrics.filefd_gauge("unknown").is_none());
    }
}
