//! Request execution and outcome classification.
//!
//! # Responsibilities
//! - Issue one GET per call with a bounded timeout
//! - Measure wall-clock latency and classify the result
//! - Report each outcome through the sink and the metrics helpers
//!
//! # Design Decisions
//! - `execute` never returns an error: every failure mode is folded into a
//!   classified [`RequestOutcome`], so generator loops cannot be unwound by
//!   a single bad request
//! - A timed-out request reports the configured timeout as its duration
//!   rather than measured elapsed, to avoid overcounting
//! - No retries anywhere: each attempt is recorded once and the generator
//!   moves on

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use url::Url;

use crate::config::TargetConfig;
use crate::observability::metrics;
use crate::traffic::report::OutcomeSink;

/// Status recorded for a request that timed out.
pub const TIMEOUT_STATUS: u16 = 408;
/// Status recorded for a request that failed before any HTTP response.
pub const TRANSPORT_STATUS: u16 = 500;

/// Categorical outcome bucket of a request attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Ok,
    ClientError,
    ServerError,
    Timeout,
    TransportError,
}

impl Classification {
    /// Classify an HTTP status code that was actually received.
    pub fn from_status(status: u16) -> Self {
        match status {
            0..=399 => Classification::Ok,
            400..=499 => Classification::ClientError,
            _ => Classification::ServerError,
        }
    }

    /// Visual marker used in report lines.
    pub fn marker(&self) -> &'static str {
        match self {
            Classification::Ok => "✅",
            Classification::ClientError | Classification::ServerError => "❌",
            Classification::Timeout => "⏰",
            Classification::TransportError => "💥",
        }
    }

    /// Label used on outcome metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Ok => "ok",
            Classification::ClientError => "client_error",
            Classification::ServerError => "server_error",
            Classification::Timeout => "timeout",
            Classification::TransportError => "transport_error",
        }
    }
}

/// The result of one request attempt. Immutable once produced; consumed by
/// the sink immediately and not retained by the engine.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    pub path: String,
    pub status: u16,
    pub duration: Duration,
    pub classification: Classification,
}

/// Issues single GET requests against the target and classifies outcomes.
pub struct RequestExecutor {
    client: Client,
    base_url: Url,
    timeout: Duration,
    sink: Arc<dyn OutcomeSink>,
}

impl RequestExecutor {
    pub fn new(target: &TargetConfig, sink: Arc<dyn OutcomeSink>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().no_proxy().build()?;

        Ok(Self {
            client,
            base_url: target.base_url.clone(),
            timeout: Duration::from_secs(target.request_timeout_secs),
            sink,
        })
    }

    /// The per-request timeout this executor applies.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue one GET to `base_url + path` and classify the result.
    ///
    /// Never returns an error to the caller.
    pub async fn execute(&self, path: &str) -> RequestOutcome {
        let url = match self.base_url.join(path) {
            Ok(url) => url,
            Err(err) => {
                tracing::error!(path, error = %err, "failed to build request URL");
                return self.finish(RequestOutcome {
                    path: path.to_string(),
                    status: TRANSPORT_STATUS,
                    duration: Duration::ZERO,
                    classification: Classification::TransportError,
                });
            }
        };

        let started = Instant::now();
        let outcome = match self.client.get(url).timeout(self.timeout).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                RequestOutcome {
                    path: path.to_string(),
                    status,
                    duration: started.elapsed(),
                    classification: Classification::from_status(status),
                }
            }
            Err(err) if err.is_timeout() => RequestOutcome {
                path: path.to_string(),
                status: TIMEOUT_STATUS,
                duration: self.timeout,
                classification: Classification::Timeout,
            },
            Err(err) => {
                tracing::debug!(path, error = %err, "transport failure");
                RequestOutcome {
                    path: path.to_string(),
                    status: TRANSPORT_STATUS,
                    duration: Duration::ZERO,
                    classification: Classification::TransportError,
                }
            }
        };

        self.finish(outcome)
    }

    fn finish(&self, outcome: RequestOutcome) -> RequestOutcome {
        self.sink.record(&outcome);
        metrics::record_outcome(
            &outcome.path,
            outcome.classification.as_str(),
            outcome.duration,
        );
        outcome
    }
}
