//! Config command implementation.
//!
//! Generates configuration files in various formats.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use crate::cli::ConfigFormat;
use crate::config::{render_config, Config};

/// Generates configuration files.
pub fn command_config(
    output: Option<PathBuf>,
    format: ConfigFormat,
    commented: bool,
) -> anyhow::Result<()> {
    let config = Config::default();
    let output = output.unwrap_or_else(|| PathBuf::from("herakles-irq-exporter.yaml"));

    let mut content = render_config(&config, &format)
        .map_err(|e| anyhow::anyhow!("failed to render configuration: {}", e))?;
    if commented && matches!(format, ConfigFormat::Yaml) {
        content = add_config_comments(content);
    }

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!("✅ Configuration written to: {}", output.display());
    }

    Ok(())
}

/// Adds comments to YAML configuration.
fn add_config_comments(yaml: String) -> String {
    let comments = r#"# Herakles IRQ Exporter Configuration
# ===================================
#
# Server Configuration
# --------------------
# bind: "0.0.0.0"              # Bind IP (0.0.0.0 = all interfaces)
# port: 9216                   # HTTP port
#
# Logging
# -------
# log_level: "info"            # off, error, warn, info, debug, trace
#
# Metrics Collection
# ------------------
# procfs_path: "/proc"         # procfs mountpoint (e.g. /host/proc in containers)
# namespace: "node"            # Prefix of all exported metric names
#
# Collector Enable Flags
# ----------------------
# enable_interrupts_collector: true  # /proc/interrupts
# enable_filefd_collector: true      # /proc/sys/fs/file-nr
#
# Interrupts Collector
# --------------------
# interrupts:
#   include_zeros: false       # Export counters that are zero
#   name_include: null         # Regex on "name;info;devices" to export
#   name_exclude: null         # Regex on "name;info;devices" to ignore
"#;

    format!("{comments}\n{yaml}")
}
