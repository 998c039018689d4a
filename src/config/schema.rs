//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the traffic
//! generator and the simulated target service. All types derive Serde traits
//! for deserialization from config files; every section carries defaults so a
//! missing file or empty table yields a runnable configuration.

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration shared by the generator and the target service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Target service location and request timeout.
    pub target: TargetConfig,

    /// Endpoint table with relative selection weights.
    pub endpoints: Vec<EndpointConfig>,

    /// Burst traffic settings.
    pub burst: BurstConfig,

    /// Steady traffic settings.
    pub steady: SteadyConfig,

    /// Mixed-session settings.
    pub mixed: MixedConfig,

    /// Preflight health-check settings.
    pub preflight: PreflightConfig,

    /// Observability settings for the generator process.
    pub observability: ObservabilityConfig,

    /// Simulated target service settings.
    pub service: ServiceConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target: TargetConfig::default(),
            endpoints: default_endpoints(),
            burst: BurstConfig::default(),
            steady: SteadyConfig::default(),
            mixed: MixedConfig::default(),
            preflight: PreflightConfig::default(),
            observability: ObservabilityConfig::default(),
            service: ServiceConfig::default(),
        }
    }
}

/// Target service location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Base URL every request path is appended to.
    pub base_url: Url,

    /// Per-request timeout in seconds for generated traffic.
    pub request_timeout_secs: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:8000").unwrap(),
            request_timeout_secs: 10,
        }
    }
}

/// A single target route with its relative selection weight.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Request path, including the leading slash.
    pub path: String,

    /// Relative selection weight (must be positive).
    pub weight: f64,
}

/// The default traffic mix: mostly root and health-check traffic with
/// occasional slow, failing, and CPU-bound requests.
fn default_endpoints() -> Vec<EndpointConfig> {
    vec![
        EndpointConfig { path: "/".into(), weight: 0.4 },
        EndpointConfig { path: "/health".into(), weight: 0.3 },
        EndpointConfig { path: "/slow".into(), weight: 0.1 },
        EndpointConfig { path: "/error".into(), weight: 0.1 },
        EndpointConfig { path: "/cpu-intensive".into(), weight: 0.1 },
    ]
}

/// Burst traffic configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Number of requests fired per burst.
    pub batch_size: usize,

    /// Concurrency cap for burst workers; excess tasks queue for a free slot.
    pub pool_size: usize,

    /// Per-task wait when collecting burst results, in seconds. Layered on
    /// top of the request timeout; tasks still running when it expires are
    /// abandoned.
    pub wait_timeout_secs: u64,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            batch_size: 20,
            pool_size: 10,
            wait_timeout_secs: 15,
        }
    }
}

/// Steady traffic configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SteadyConfig {
    /// Long-run target rate in requests per minute.
    pub target_rpm: f64,

    /// Lower bound of the per-request jitter sleep, in seconds.
    pub jitter_min_secs: f64,

    /// Upper bound of the per-request jitter sleep, in seconds.
    pub jitter_max_secs: f64,
}

impl Default for SteadyConfig {
    fn default() -> Self {
        Self {
            target_rpm: 30.0,
            jitter_min_secs: 0.5,
            jitter_max_secs: 2.0,
        }
    }
}

/// Mixed-session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MixedConfig {
    /// Total session duration in seconds when no CLI override is given.
    pub duration_secs: u64,

    /// Rate for the background steady stream, in requests per minute. Kept
    /// below the standalone steady default to leave headroom for bursts.
    pub background_rpm: f64,

    /// Lower bound of the pause between bursts, in seconds.
    pub burst_pause_min_secs: f64,

    /// Upper bound of the pause between bursts, in seconds.
    pub burst_pause_max_secs: f64,
}

impl Default for MixedConfig {
    fn default() -> Self {
        Self {
            duration_secs: 180,
            background_rpm: 20.0,
            burst_pause_min_secs: 15.0,
            burst_pause_max_secs: 30.0,
        }
    }
}

/// Preflight health-check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PreflightConfig {
    /// Path probed for readiness.
    pub path: String,

    /// Probe timeout in seconds. Shorter than the traffic timeout so an
    /// unreachable target fails fast.
    pub timeout_secs: u64,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        Self {
            path: "/health".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Observability configuration for the generator process.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address for the generator.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9091".to_string(),
        }
    }
}

/// Simulated target service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Bind address for the service listener.
    pub bind_address: String,

    /// Metrics endpoint bind address for the service. Distinct from the
    /// generator's so both processes can run on one host.
    pub metrics_address: String,

    /// Request timeout applied by the service middleware, in seconds.
    pub request_timeout_secs: u64,

    /// Probability that `/error` returns a 500.
    pub error_rate: f64,

    /// Simulated processing delay bounds for `/`, in seconds.
    pub root_delay_min_secs: f64,
    pub root_delay_max_secs: f64,

    /// Simulated processing delay bounds for `/slow`, in seconds.
    pub slow_delay_min_secs: f64,
    pub slow_delay_max_secs: f64,

    /// Iteration bounds for the `/cpu-intensive` work loop.
    pub cpu_iterations_min: u64,
    pub cpu_iterations_max: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            metrics_address: "0.0.0.0:9090".to_string(),
            request_timeout_secs: 30,
            error_rate: 0.7,
            root_delay_min_secs: 0.1,
            root_delay_max_secs: 0.5,
            slow_delay_min_secs: 1.0,
            slow_delay_max_secs: 3.0,
            cpu_iterations_min: 100_000,
            cpu_iterations_max: 500_000,
        }
    }
}
