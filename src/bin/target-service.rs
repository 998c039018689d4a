//! Instrumented demo service the traffic generator runs against.
//!
//! Serves `/`, `/slow`, `/error`, `/health`, and `/cpu-intensive` with
//! simulated work, structured logs, and Prometheus request metrics.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use load_generator::config::{self, GeneratorConfig};
use load_generator::{observability, service};

#[derive(Parser)]
#[command(name = "target-service")]
#[command(about = "Instrumented HTTP service with simulated work", long_about = None)]
struct Cli {
    /// Override the bind address.
    #[arg(long)]
    bind: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.service.bind_address = bind;
    }

    observability::logging::init(&config.observability.log_level);

    if config.observability.metrics_enabled {
        match config.service.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(err) => tracing::error!(
                metrics_address = %config.service.metrics_address,
                error = %err,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.service.bind_address).await?;
    service::serve(listener, config.service).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
