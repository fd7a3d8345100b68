//! herakles-irq-exporter - version 0.1.0
//!
//! Interrupt and file descriptor metrics exporter with tracing logging.
//! This is the main entry point that initializes the server and handles subcommands.

mod cli;
mod commands;
mod config;
mod handlers;
mod state;

use axum::{routing::get, Router};
use clap::Parser;
use herakles_irq_exporter::metrics::DEFAULT_NAMESPACE;
use herakles_irq_exporter::ExporterMetrics;
use prometheus::{Gauge, Registry};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;
use tokio::{net::TcpListener, signal, sync::Mutex};
use tracing::{debug, error, info, Level};

use cli::{Args, Commands};
use commands::{command_check, command_config, command_test};
use config::{
    resolve_config, show_config, validate_effective_config, Config, DEFAULT_BIND_ADDR, DEFAULT_PORT,
};
use handlers::{metrics_handler, root_handler};
use state::{build_collectors, AppState};

/// Initializes tracing logging subsystem with configured log level.
fn setup_logging(config: &Config) {
    let level = config.log_level.as_deref().unwrap_or("info");
    if level == "off" {
        return;
    }

    let max_level = match level {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    info!("Logging initialized with level: {}", level);
}

/// Helper function to load and validate configuration.
/// Exits the process with error code 1 if validation fails.
fn load_validated_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;
    if let Err(e) = validate_effective_config(&config) {
        eprintln!("❌ Configuration invalid: {}", e);
        std::process::exit(1);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.check_config {
        let config = resolve_config(&args)?;
        match validate_effective_config(&config) {
            Ok(_) => {
                println!("✅ Configuration is valid");
                return Ok(());
            }
            Err(e) => {
                eprintln!("❌ Configuration invalid: {}", e);
                std::process::exit(1);
            }
        }
    }

    if args.show_config {
        let config = resolve_config(&args)?;
        show_config(&config, &args.config_format)?;
        return Ok(());
    }

    if let Some(command) = &args.command {
        let result = match command {
            Commands::Config {
                output,
                format,
                commented,
            } => command_config(output.clone(), format.clone(), *commented),
            Commands::Check => {
                let config = load_validated_config(&args)?;
                command_check(&config)
            }
            Commands::Test {
                iterations,
                verbose,
            } => {
                let config = load_validated_config(&args)?;
                setup_logging(&config);
                command_test(*iterations, *verbose, &config)
            }
        };

        if let Err(e) = result {
            eprintln!("\n❌ {:#}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    // Load configuration for main server mode
    let config = load_validated_config(&args)?;

    setup_logging(&config);

    info!("Starting herakles-irq-exporter");

    let bind_ip_str = config.bind.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
    let port = config.port.unwrap_or(DEFAULT_PORT);

    // Initialize Prometheus metrics registry
    let registry = Registry::new();
    debug!("Prometheus registry initialized");

    let namespace = config.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE);
    let metrics = ExporterMetrics::new(&registry, namespace)?;
    let scrape_duration = Gauge::new(
        "herakles_exporter_scrape_duration_seconds",
        "Time spent serving the last /metrics request",
    )?;
    registry.register(Box::new(scrape_duration.clone()))?;

    debug!("All metrics registered successfully");

    let collectors = build_collectors(&config)?;
    info!(
        "Enabled collectors: {}",
        collectors
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let state = Arc::new(AppState {
        registry,
        metrics,
        scrape_duration,
        collectors,
        scrape_lock: Mutex::new(()),
        config: Arc::new(config.clone()),
        start_time: Instant::now(),
    });

    // Setup graceful shutdown signal handlers
    let shutdown_signal = async {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to install signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received SIGINT (Ctrl+C), shutting down gracefully...");
            }
            _ = terminate => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    };

    // Configure HTTP server routes
    let addr = SocketAddr::new(bind_ip_str.parse::<IpAddr>()?, port);

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state);

    let listener = TcpListener::bind(addr).await?;
    info!(
        "herakles-irq-exporter listening on http://{}:{}",
        bind_ip_str, port
    );

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
                return Err(e.into());
            }
        }
        _ = shutdown_signal => {
            info!("Shutdown signal received, exiting...");
        }
    }

    info!("herakles-irq-exporter stopped gracefully");
    Ok(())
}
