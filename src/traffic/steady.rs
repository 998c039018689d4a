//! Steady traffic generation.
//!
//! # Responsibilities
//! - Issue requests for a configured duration at an approximate target rate
//! - Converge long-run throughput toward the target via corrective sleeps
//!
//! # Design Decisions
//! - Negative feedback instead of a precise scheduler: after each request,
//!   compare the issued count against what the target rate implies for the
//!   elapsed time and sleep off any surplus. Slowing down when ahead
//!   tolerates request-latency variance without clock-tick bookkeeping
//! - A jitter sleep follows every correction so the spacing never turns
//!   perfectly periodic
//! - The duration budget is checked before each new request, not mid-sleep

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time;

use crate::config::SteadyConfig;
use crate::traffic::catalog::EndpointCatalog;
use crate::traffic::executor::RequestExecutor;
use crate::traffic::random::{RandomSource, SystemRandom};
use crate::traffic::session::{GenerationMode, GenerationSession};

/// Issued-count bookkeeping for one steady session.
#[derive(Debug)]
struct RateTracker {
    started: Instant,
    issued: u64,
}

impl RateTracker {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            issued: 0,
        }
    }

    fn record_issue(&mut self) {
        self.issued += 1;
    }

    fn corrective_sleep(&self, target_rpm: f64) -> Option<Duration> {
        pacing_delay(self.started.elapsed(), self.issued, target_rpm)
    }
}

/// Sleep needed to realign the issued count with the target rate.
///
/// Returns `None` when the loop is at or behind schedule.
fn pacing_delay(elapsed: Duration, issued: u64, target_rpm: f64) -> Option<Duration> {
    let expected = elapsed.as_secs_f64() / 60.0 * target_rpm;
    let surplus = issued as f64 - expected;
    if surplus > 0.0 {
        Some(Duration::from_secs_f64(surplus * 60.0 / target_rpm))
    } else {
        None
    }
}

/// Paces requests toward a target requests-per-minute rate.
pub struct SteadyGenerator<R = SystemRandom> {
    executor: Arc<RequestExecutor>,
    catalog: Arc<EndpointCatalog>,
    config: SteadyConfig,
    rng: R,
}

impl SteadyGenerator<SystemRandom> {
    pub fn new(
        executor: Arc<RequestExecutor>,
        catalog: Arc<EndpointCatalog>,
        config: SteadyConfig,
    ) -> Self {
        Self::with_random(executor, catalog, config, SystemRandom)
    }
}

impl<R: RandomSource> SteadyGenerator<R> {
    pub fn with_random(
        executor: Arc<RequestExecutor>,
        catalog: Arc<EndpointCatalog>,
        config: SteadyConfig,
        rng: R,
    ) -> Self {
        Self {
            executor,
            catalog,
            config,
            rng,
        }
    }

    /// Issue paced requests until `duration` has elapsed.
    ///
    /// Returns the number of requests issued.
    pub async fn run(mut self, duration: Duration) -> u64 {
        let session = GenerationSession::new(
            GenerationMode::Steady,
            Some(duration),
            Some(self.config.target_rpm),
        );
        tracing::info!(
            mode = session.mode.as_str(),
            duration_secs = duration.as_secs_f64(),
            target_rpm = self.config.target_rpm,
            "steady traffic starting"
        );

        let mut tracker = RateTracker::new();
        while !session.expired() {
            let path = self.catalog.sample(&mut self.rng).path.clone();
            self.executor.execute(&path).await;
            tracker.record_issue();

            if let Some(correction) = tracker.corrective_sleep(self.config.target_rpm) {
                time::sleep(correction).await;
            }

            let jitter = self
                .rng
                .uniform(self.config.jitter_min_secs, self.config.jitter_max_secs);
            time::sleep(Duration::from_secs_f64(jitter)).await;
        }

        tracing::info!(issued = tracker.issued, "steady traffic complete");
        tracker.issued
    }
}
