//! Herakles IRQ Exporter Library
//!
//! This library turns Linux procfs snapshots into Prometheus metrics:
//!
//! - **Interrupts**: `/proc/interrupts` becomes one counter per interrupt and
//!   CPU, labelled `cpu`, `type`, `info` and `devices`.
//! - **File descriptors**: `/proc/sys/fs/file-nr` becomes the
//!   `filefd_allocated` and `filefd_maximum` gauges.
//!
//! Collectors are framework-agnostic: they push observations into any
//! [`MetricSink`] and ask a [`NameFilter`] which interrupts to skip.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use herakles_irq_exporter::{Collector, DeviceFilter, InterruptsCollector, Observation, ProcFs};
//!
//! let filter = DeviceFilter::new(Some("^LOC;"), None).unwrap();
//! let collector = InterruptsCollector::new(ProcFs::default(), Arc::new(filter), false);
//!
//! let mut observations: Vec<Observation> = Vec::new();
//! collector.update(&mut observations).unwrap();
//!
//! for observation in &observations {
//!     println!("{:?}", observation);
//! }
//! ```

pub mod collectors;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod procfs;
pub mod sanitize;
pub mod sink;

// Re-export main types for convenience
pub use collectors::filefd::{parse_file_fd_stats, FileFdCollector};
pub use collectors::interrupts::{
    emit_interrupts, get_interrupts, parse_interrupts, InterruptRecord, InterruptsCollector,
};
pub use collectors::{scrape, Collector};
pub use error::CollectError;
pub use filter::{DeviceFilter, NameFilter};
pub use metrics::ExporterMetrics;
pub use procfs::ProcFs;
pub use sanitize::sanitize_metric_name;
pub use sink::{FileFdObservation, InterruptObservation, MetricSink, Observation, PrometheusSink};
