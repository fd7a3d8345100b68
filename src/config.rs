//! Configuration management for herakles-irq-exporter.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat};
use herakles_irq_exporter::filter::DeviceFilter;
use herakles_irq_exporter::metrics::DEFAULT_NAMESPACE;
use herakles_irq_exporter::procfs::{ProcFs, DEFAULT_PROCFS_PATH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 9216;

/// Interrupts collector configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterruptsConfig {
    /// Export counters that are zero (default: false)
    #[serde(default, alias = "include-zeros")]
    pub include_zeros: bool,

    /// Regex of `name;info;devices` identities to export
    #[serde(default, alias = "name-include")]
    pub name_include: Option<String>,

    /// Regex of `name;info;devices` identities to ignore
    #[serde(default, alias = "name-exclude")]
    pub name_exclude: Option<String>,
}

/// Enhanced configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub port: Option<u16>,
    pub bind: Option<String>,

    // Logging
    pub log_level: Option<String>,

    // Metrics collection
    #[serde(alias = "path-procfs")]
    pub procfs_path: Option<PathBuf>,
    pub namespace: Option<String>,

    // Collector enable flags
    #[serde(alias = "enable-interrupts-collector")]
    pub enable_interrupts_collector: Option<bool>,
    #[serde(alias = "enable-filefd-collector")]
    pub enable_filefd_collector: Option<bool>,

    // Interrupts collector configuration
    #[serde(default)]
    pub interrupts: InterruptsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: Some(DEFAULT_BIND_ADDR.to_string()),
            port: Some(DEFAULT_PORT),
            log_level: Some("info".into()),
            procfs_path: Some(PathBuf::from(DEFAULT_PROCFS_PATH)),
            namespace: Some(DEFAULT_NAMESPACE.to_string()),
            enable_interrupts_collector: Some(true),
            enable_filefd_collector: Some(true),
            interrupts: InterruptsConfig::default(),
        }
    }
}

impl Config {
    /// Procfs mount point the collectors read from.
    pub fn procfs(&self) -> ProcFs {
        self.procfs_path
            .as_ref()
            .map(ProcFs::new)
            .unwrap_or_default()
    }

    /// Builds the interrupt name filter from the configured patterns.
    pub fn interrupts_filter(&self) -> Result<DeviceFilter, regex::Error> {
        DeviceFilter::new(
            self.interrupts.name_exclude.as_deref(),
            self.interrupts.name_include.as_deref(),
        )
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let enable_interrupts = cfg.enable_interrupts_collector.unwrap_or(true);
    let enable_filefd = cfg.enable_filefd_collector.unwrap_or(true);

    if !(enable_interrupts || enable_filefd) {
        return Err(
            "At least one of enable_interrupts_collector/enable_filefd_collector must be true"
                .into(),
        );
    }

    if cfg.port == Some(0) {
        return Err("port must not be 0".into());
    }

    if let Some(ns) = cfg.namespace.as_deref() {
        if ns.is_empty() {
            return Err("namespace must not be empty".into());
        }
    }

    if let Some(level) = cfg.log_level.as_deref() {
        if !matches!(level, "off" | "error" | "warn" | "info" | "debug" | "trace") {
            return Err(format!(
                "Invalid log_level '{}', expected off, error, warn, info, debug or trace",
                level
            )
            .into());
        }
    }

    if let Err(e) = cfg.interrupts_filter() {
        return Err(format!("Invalid interrupts name filter: {}", e).into());
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    // Override with CLI args
    if let Some(bind_ip) = args.bind {
        config.bind = Some(bind_ip.to_string());
    }

    // Only override port if the user supplied it on the CLI.
    if let Some(cli_port) = args.port {
        config.port = Some(cli_port);
    }

    if let Some(level) = &args.log_level {
        config.log_level = Some(level.as_str().to_string());
    }

    if let Some(procfs) = &args.procfs_path {
        config.procfs_path = Some(procfs.clone());
    }
    if let Some(ns) = &args.namespace {
        config.namespace = Some(ns.clone());
    }

    // Interrupts collector settings
    if args.include_zeros {
        config.interrupts.include_zeros = true;
    }
    if let Some(include) = &args.interrupts_name_include {
        config.interrupts.name_include = Some(include.clone());
    }
    if let Some(exclude) = &args.interrupts_name_exclude {
        config.interrupts.name_exclude = Some(exclude.clone());
    }

    // Collector flags
    if args.disable_interrupts {
        config.enable_interrupts_collector = Some(false);
    }
    if args.disable_filefd {
        config.enable_filefd_collector = Some(false);
    }

    Ok(config)
}

/// Enhanced configuration loading with multiple format support
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = if let Some(p) = path {
        PathBuf::from(p)
    } else {
        // Try default locations
        let defaults = [
            "/etc/herakles/irq-exporter.yaml",
            "/etc/herakles/irq-exporter.yml",
            "/etc/herakles/irq-exporter.json",
            "./herakles-irq-exporter.yaml",
            "./herakles-irq-exporter.yml",
            "./herakles-irq-exporter.json",
        ];

        defaults
            .iter()
            .find(|p| Path::new(p).exists())
            .map(PathBuf::from)
            .unwrap_or_default()
    };

    if path.as_os_str().is_empty() || !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)?;
    let config = parse_config(&content, &path)?;
    info!("Loaded configuration from: {}", path.display());
    Ok(config)
}

/// Parses configuration content, choosing the format by file extension.
fn parse_config(content: &str, path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(content)?,
        Some("toml") => toml::from_str(content)?,
        // Default to YAML
        _ => serde_yaml::from_str(content)?,
    };
    Ok(config)
}

/// Renders configuration in the requested format.
pub fn render_config(
    config: &Config,
    format: &ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: &ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render_config(config, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate_effective_config(&config).is_ok());
        assert_eq!(config.port, Some(DEFAULT_PORT));
        assert!(!config.interrupts.include_zeros);
    }

    #[test]
    fn test_all_collectors_disabled_is_invalid() {
        let config = Config {
            enable_interrupts_collector: Some(false),
            enable_filefd_collector: Some(false),
            ..Config::default()
        };
        assert!(validate_effective_config(&config).is_err());
    }

    #[test]
    fn test_invalid_filter_regex_is_rejected() {
        let mut config = Config::default();
        config.interrupts.name_exclude = Some("([".to_string());
        let err = validate_effective_config(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid interrupts name filter"));
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
port: 9999
procfs_path: /host/proc
interrupts:
  include_zeros: true
  name_exclude: "^LOC;"
"#;
        let config = parse_config(yaml, Path::new("config.yaml")).unwrap();
        assert_eq!(config.port, Some(9999));
        assert_eq!(config.procfs_path, Some(PathBuf::from("/host/proc")));
        assert!(config.interrupts.include_zeros);
        assert_eq!(config.interrupts.name_exclude.as_deref(), Some("^LOC;"));
        assert!(config.enable_filefd_collector.is_none());
    }

    #[test]
    fn test_parse_json_and_toml_config() {
        let json = r#"{"port": 9300, "enable-filefd-collector": false}"#;
        let config = parse_config(json, Path::new("config.json")).unwrap();
        assert_eq!(config.port, Some(9300));
        assert_eq!(config.enable_filefd_collector, Some(false));

        let toml = "namespace = \"host\"\n\n[interrupts]\nname_include = \"eth\"\n";
        let config = parse_config(toml, Path::new("config.toml")).unwrap();
        assert_eq!(config.namespace.as_deref(), Some("host"));
        assert_eq!(config.interrupts.name_include.as_deref(), Some("eth"));
    }

    #[test]
    fn test_missing_config_file_falls_back_to_default() {
        let config = load_config(Some(Path::new("/nonexistent/irq-exporter.yaml"))).unwrap();
        assert_eq!(config.port, Some(DEFAULT_PORT));
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from([
            "herakles-irq-exporter",
            "--no-config",
            "--port",
            "9400",
            "--include-zeros",
            "--interrupts-name-include",
            "eth0",
            "--disable-filefd",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.port, Some(9400));
        assert!(config.interrupts.include_zeros);
        assert_eq!(config.interrupts.name_include.as_deref(), Some("eth0"));
        assert_eq!(config.enable_filefd_collector, Some(false));
        assert_eq!(config.enable_interrupts_collector, Some(true));
    }

    #[test]
    fn test_render_config_roundtrips_yaml() {
        let config = Config::default();
        let yaml = render_config(&config, &ConfigFormat::Yaml).unwrap();
        let parsed = parse_config(&yaml, Path::new("x.yaml")).unwrap();
        assert_eq!(parsed.port, config.port);
        assert_eq!(parsed.namespace, config.namespace);
    }
}
