//! Route handlers with simulated work.
//!
//! Each handler mimics a class of production behavior: short processing
//! (`/`), slow upstream calls (`/slow`), intermittent failures (`/error`),
//! readiness (`/health`), and CPU-bound work (`/cpu-intensive`). Bodies are
//! JSON; the traffic generator never interprets them.

use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tokio::task;
use tokio::time::{sleep, Duration};

use crate::observability::metrics;
use crate::service::ServiceState;

fn uniform(lo: f64, hi: f64) -> f64 {
    lo + fastrand::f64() * (hi - lo)
}

/// Root endpoint: short randomized processing delay.
pub async fn root(State(state): State<Arc<ServiceState>>) -> Json<Value> {
    let started = Instant::now();
    let processing_time = uniform(
        state.config.root_delay_min_secs,
        state.config.root_delay_max_secs,
    );
    sleep(Duration::from_secs_f64(processing_time)).await;

    tracing::info!(endpoint = "/", processing_time, "root endpoint accessed");
    metrics::record_request("/", 200, started.elapsed());

    Json(json!({
        "message": "Hello from monitored service!",
        "processing_time": processing_time,
        "endpoint": "/",
    }))
}

/// Slow endpoint: seconds-long simulated upstream call.
pub async fn slow(State(state): State<Arc<ServiceState>>) -> Json<Value> {
    let started = Instant::now();
    let processing_time = uniform(
        state.config.slow_delay_min_secs,
        state.config.slow_delay_max_secs,
    );
    sleep(Duration::from_secs_f64(processing_time)).await;

    tracing::info!(endpoint = "/slow", processing_time, "slow endpoint accessed");
    metrics::record_request("/slow", 200, started.elapsed());

    Json(json!({
        "message": "This was a slow operation",
        "processing_time": processing_time,
        "endpoint": "/slow",
    }))
}

/// Error endpoint: fails with a 500 at the configured rate.
pub async fn error(State(state): State<Arc<ServiceState>>) -> Response {
    let started = Instant::now();
    let will_error = fastrand::f64() < state.config.error_rate;

    if will_error {
        tracing::error!(endpoint = "/error", will_error, "simulating server error");
        metrics::record_request("/error", 500, started.elapsed());

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "Simulated server error" })),
        )
            .into_response()
    } else {
        tracing::info!(endpoint = "/error", will_error, "no error this time");
        metrics::record_request("/error", 200, started.elapsed());

        Json(json!({
            "message": "No error this time!",
            "endpoint": "/error",
        }))
        .into_response()
    }
}

/// Readiness probe.
pub async fn health() -> Json<Value> {
    let started = Instant::now();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();

    tracing::info!(endpoint = "/health", "health check performed");
    metrics::record_request("/health", 200, started.elapsed());

    Json(json!({
        "status": "healthy",
        "timestamp": timestamp,
        "endpoint": "/health",
    }))
}

/// CPU-bound endpoint: sum of squares over a random iteration count, run
/// off the async workers so it cannot stall the runtime.
pub async fn cpu_intensive(State(state): State<Arc<ServiceState>>) -> Json<Value> {
    let started = Instant::now();
    let iterations = fastrand::u64(
        state.config.cpu_iterations_min..=state.config.cpu_iterations_max,
    );

    let result = task::spawn_blocking(move || (0..iterations).map(|i| i * i).sum::<u64>())
        .await
        .unwrap_or(0);
    let duration = started.elapsed();

    tracing::info!(
        endpoint = "/cpu-intensive",
        iterations,
        duration_secs = duration.as_secs_f64(),
        "cpu intensive operation completed"
    );
    metrics::record_request("/cpu-intensive", 200, duration);

    Json(json!({
        "message": "CPU intensive operation completed",
        "iterations": iterations,
        "result": result,
        "duration": duration.as_secs_f64(),
        "endpoint": "/cpu-intensive",
    }))
}
