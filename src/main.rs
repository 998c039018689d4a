//! Synthetic Traffic Generator
//!
//! Exercises the monitored target service with realistic traffic mixes:
//! steady background load, periodic bursts, and randomized spikes.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌───────────────────────────────────────────────┐
//!                  │              LOAD GENERATOR                    │
//!                  │                                                │
//!   CLI / config ──┼─▶ preflight ──▶ mixed orchestrator             │
//!                  │   checker          │                           │
//!                  │                    ├──▶ steady generator       │
//!                  │                    │    (background task)      │
//!                  │                    └──▶ burst generator        │
//!                  │                         (bounded worker pool)  │
//!                  │                             │                  │
//!                  │                             ▼                  │
//!                  │                    weighted selector           │
//!                  │                             │                  │
//!                  │                             ▼                  │
//!   report lines ◀─┼──────────────────  request executor ───────────┼──▶ Target
//!   + metrics      │                                                │    Service
//!                  └───────────────────────────────────────────────┘
//! ```
//!
//! The preflight health check is the only fatal path: a target that is not
//! ready aborts the program with exit code 1 before any traffic is sent.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use url::Url;

use load_generator::config::{self, ConfigError, GeneratorConfig};
use load_generator::observability;
use load_generator::traffic::{
    ConsoleSink, EndpointCatalog, MixedOrchestrator, PreflightChecker, RequestExecutor,
};

#[derive(Parser)]
#[command(name = "load-generator")]
#[command(about = "Synthetic traffic generator for the monitored target service", long_about = None)]
struct Cli {
    /// Total mixed-traffic duration in seconds (defaults to the configured
    /// session length).
    duration_secs: Option<u64>,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the target base URL.
    #[arg(long)]
    base_url: Option<Url>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.target.base_url = base_url;
    }

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        base_url = %config.target.base_url,
        endpoints = config.endpoints.len(),
        "load-generator starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(err) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %err,
                "Failed to parse metrics address"
            ),
        }
    }

    let catalog = Arc::new(
        EndpointCatalog::from_config(&config.endpoints).map_err(ConfigError::Validation)?,
    );

    let preflight = PreflightChecker::new(config.target.base_url.clone(), &config.preflight)?;
    if let Err(err) = preflight.check().await {
        tracing::error!(error = %err, "target service failed the preflight health check");
        eprintln!(
            "❌ Target service at {} is not ready: {}",
            config.target.base_url, err
        );
        eprintln!("Start it first with: cargo run --bin target-service");
        std::process::exit(1);
    }
    preflight.survey(&catalog).await;

    let sink = Arc::new(ConsoleSink);
    let executor = Arc::new(RequestExecutor::new(&config.target, sink)?);

    let duration = Duration::from_secs(cli.duration_secs.unwrap_or(config.mixed.duration_secs));
    let orchestrator = MixedOrchestrator::new(executor, catalog, &config);

    // The returned background handle is dropped un-joined: the steady
    // stream runs until its own budget expires or the process exits.
    let _steady = orchestrator.run(duration).await;

    tracing::info!("traffic generation complete");
    Ok(())
}
