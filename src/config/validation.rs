//! Configuration validation.
//!
//! Serde handles syntactic checks; this module covers the semantic ones:
//! endpoint weights must be positive and paths unique, rates and timeouts
//! must be positive, interval bounds must be ordered, and addresses must
//! parse. Validation is a pure function and returns every problem found,
//! not just the first.

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{EndpointConfig, GeneratorConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("endpoint table is empty")]
    NoEndpoints,

    #[error("duplicate endpoint path {path:?}")]
    DuplicatePath { path: String },

    #[error("endpoint {path:?} has non-positive weight {weight}")]
    NonPositiveWeight { path: String, weight: f64 },

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("{field} bounds are inverted ({min} > {max})")]
    InvertedBounds { field: &'static str, min: f64, max: f64 },

    #[error("{field} is not a valid socket address: {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("service.error_rate {0} is outside [0, 1]")]
    ErrorRateOutOfRange(f64),
}

/// Validate a configuration, collecting all semantic errors.
pub fn validate_config(config: &GeneratorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    errors.extend(validate_endpoints(&config.endpoints));

    check_positive(&mut errors, "target.request_timeout_secs", config.target.request_timeout_secs as f64);
    check_positive(&mut errors, "preflight.timeout_secs", config.preflight.timeout_secs as f64);

    check_positive(&mut errors, "burst.batch_size", config.burst.batch_size as f64);
    check_positive(&mut errors, "burst.pool_size", config.burst.pool_size as f64);
    check_positive(&mut errors, "burst.wait_timeout_secs", config.burst.wait_timeout_secs as f64);

    check_positive(&mut errors, "steady.target_rpm", config.steady.target_rpm);
    check_bounds(
        &mut errors,
        "steady.jitter_secs",
        config.steady.jitter_min_secs,
        config.steady.jitter_max_secs,
    );

    check_positive(&mut errors, "mixed.duration_secs", config.mixed.duration_secs as f64);
    check_positive(&mut errors, "mixed.background_rpm", config.mixed.background_rpm);
    check_bounds(
        &mut errors,
        "mixed.burst_pause_secs",
        config.mixed.burst_pause_min_secs,
        config.mixed.burst_pause_max_secs,
    );

    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }
    check_address(&mut errors, "service.bind_address", &config.service.bind_address);
    check_address(&mut errors, "service.metrics_address", &config.service.metrics_address);

    if !(0.0..=1.0).contains(&config.service.error_rate) {
        errors.push(ValidationError::ErrorRateOutOfRange(config.service.error_rate));
    }
    check_bounds(
        &mut errors,
        "service.root_delay_secs",
        config.service.root_delay_min_secs,
        config.service.root_delay_max_secs,
    );
    check_bounds(
        &mut errors,
        "service.slow_delay_secs",
        config.service.slow_delay_min_secs,
        config.service.slow_delay_max_secs,
    );
    check_bounds(
        &mut errors,
        "service.cpu_iterations",
        config.service.cpu_iterations_min as f64,
        config.service.cpu_iterations_max as f64,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate just the endpoint table. Also used by `EndpointCatalog`
/// construction so a hand-built table meets the same invariants.
pub fn validate_endpoints(endpoints: &[EndpointConfig]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if endpoints.is_empty() {
        errors.push(ValidationError::NoEndpoints);
    }
    let mut seen = HashSet::new();
    for endpoint in endpoints {
        if !seen.insert(endpoint.path.as_str()) {
            errors.push(ValidationError::DuplicatePath {
                path: endpoint.path.clone(),
            });
        }
        if !(endpoint.weight > 0.0 && endpoint.weight.is_finite()) {
            errors.push(ValidationError::NonPositiveWeight {
                path: endpoint.path.clone(),
                weight: endpoint.weight,
            });
        }
    }

    errors
}

fn check_positive(errors: &mut Vec<ValidationError>, field: &'static str, value: f64) {
    if !(value > 0.0 && value.is_finite()) {
        errors.push(ValidationError::NonPositive { field });
    }
}

fn check_bounds(errors: &mut Vec<ValidationError>, field: &'static str, min: f64, max: f64) {
    if min < 0.0 || !min.is_finite() || !max.is_finite() {
        errors.push(ValidationError::NonPositive { field });
    } else if min > max {
        errors.push(ValidationError::InvertedBounds { field, min, max });
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
