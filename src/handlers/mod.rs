//! HTTP endpoint handlers for the exporter.
//!
//! This module provides handlers for all HTTP endpoints:
//! - `/metrics`: Prometheus metrics endpoint
//! - `/`: Plain-text landing page

pub mod metrics;
pub mod root;

// Re-export handlers
pub use metrics::metrics_handler;
pub use root::root_handler;
