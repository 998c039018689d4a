//! Metrics collection and exposition.
//!
//! # Metrics
//! Service side:
//! - `http_requests_total` (counter): requests by method, endpoint, status
//! - `http_request_duration_seconds` (histogram): latency by method, endpoint
//!
//! Generator side:
//! - `traffic_requests_total` (counter): attempts by path and outcome
//!   classification
//! - `traffic_request_duration_seconds` (histogram): round-trip latency by
//!   path

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and bind its scrape endpoint.
///
/// Failure is logged, not propagated; the process runs without a scrape
/// endpoint rather than aborting.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Prometheus metrics exporter started"),
        Err(err) => tracing::error!(error = %err, "Failed to install Prometheus exporter"),
    }
}

/// Record one handled request on the service side.
pub fn record_request(endpoint: &str, status: u16, duration: Duration) {
    counter!(
        "http_requests_total",
        "method" => "GET",
        "endpoint" => endpoint.to_string(),
        "status_code" => status.to_string()
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => "GET",
        "endpoint" => endpoint.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Record one generated request attempt on the generator side.
pub fn record_outcome(path: &str, classification: &'static str, duration: Duration) {
    counter!(
        "traffic_requests_total",
        "path" => path.to_string(),
        "outcome" => classification
    )
    .increment(1);
    histogram!(
        "traffic_request_duration_seconds",
        "path" => path.to_string()
    )
    .record(duration.as_secs_f64());
}
