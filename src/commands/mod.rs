//! CLI command implementations for herakles-irq-exporter.
//!
//! This module provides implementations for all CLI subcommands:
//! - `check`: Procfs snapshot validation
//! - `config`: Configuration file generation
//! - `test`: One-shot collector runs

pub mod check;
pub mod config;
pub mod test;

// Re-export command functions
pub use check::command_check;
pub use config::command_config;
pub use test::command_test;
