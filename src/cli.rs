//! CLI arguments and subcommands for herakles-irq-exporter.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use std::net::IpAddr;
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Configuration format options for output
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "herakles-irq-exporter",
    about = "Prometheus exporter for per-CPU interrupt counters and file descriptor usage",
    long_about = "Prometheus exporter for per-CPU interrupt counters and file descriptor usage.\n\n\
                  Reads /proc/interrupts and /proc/sys/fs/file-nr on every scrape and exposes \
                  the raw kernel counters, with optional regex filtering of interrupt names.",
    author = "Michael Moll <exporter@herakles.now> - Herakles",
    version = "0.1.0",
    propagate_version = true,
    after_help = "Project: https://github.com/cansp-dev/herakles-irq-exporter | More info: https://www.herakles.now | Support: exporter@herakles.now"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// HTTP listen port
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Bind to specific interface/IP
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// Log level (overrides log_level from the config file, default: info)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,

    /// procfs mountpoint
    #[arg(long = "path-procfs")]
    pub procfs_path: Option<PathBuf>,

    /// Metric namespace (prefix of every exported metric)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Export interrupt counters that are zero
    #[arg(long)]
    pub include_zeros: bool,

    /// Regex of interrupt identities (name;info;devices) to export
    #[arg(long)]
    pub interrupts_name_include: Option<String>,

    /// Regex of interrupt identities (name;info;devices) to ignore
    #[arg(long)]
    pub interrupts_name_exclude: Option<String>,

    /// Disable the /proc/interrupts collector
    #[arg(long)]
    pub disable_interrupts: bool,

    /// Disable the /proc/sys/fs/file-nr collector
    #[arg(long)]
    pub disable_filefd: bool,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify that the procfs snapshot files are readable and parse
    Check,

    /// Generate configuration files
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,

        /// Include comments and examples
        #[arg(long)]
        commented: bool,
    },

    /// Run the collectors and print the observations
    Test {
        /// Number of test iterations
        #[arg(short = 'n', long, default_value_t = 1)]
        iterations: usize,

        /// Print every observation
        #[arg(long)]
        verbose: bool,
    },
}
