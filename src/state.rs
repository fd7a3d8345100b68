//! Application state management for the exporter.
//!
//! This module defines the shared application state that is passed
//! to HTTP handlers, and builds the enabled collectors from configuration.

use herakles_irq_exporter::{Collector, ExporterMetrics, FileFdCollector, InterruptsCollector};
use prometheus::{Gauge, Registry};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::Config;

/// Type alias for shared application state.
pub type SharedState = Arc<AppState>;

/// Global application state shared across requests.
pub struct AppState {
    pub registry: Registry,
    pub metrics: ExporterMetrics,
    pub scrape_duration: Gauge,
    pub collectors: Vec<Box<dyn Collector>>,
    /// Serializes scrapes; reset and emission share the registry.
    pub scrape_lock: Mutex<()>,
    pub config: Arc<Config>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

/// Builds the collectors enabled in the configuration.
pub fn build_collectors(config: &Config) -> Result<Vec<Box<dyn Collector>>, regex::Error> {
    let procfs = config.procfs();

    let mut collectors: Vec<Box<dyn Collector>> = Vec::new();

    if config.enable_interrupts_collector.unwrap_or(true) {
        let filter = config.interrupts_filter()?;
        if !filter.is_empty() {
            info!(
                "Interrupts name filter active (include: {:?}, exclude: {:?})",
                config.interrupts.name_include, config.interrupts.name_exclude
            );
        }
        collectors.push(Box::new(InterruptsCollector::new(
            procfs.clone(),
            Arc::new(filter),
            config.interrupts.include_zeros,
        )));
    }

    if config.enable_filefd_collector.unwrap_or(true) {
        collectors.push(Box::new(FileFdCollector::new(procfs)));
    }

    Ok(collectors)
}
