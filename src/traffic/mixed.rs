//! Mixed traffic orchestration.
//!
//! # Responsibilities
//! - Run a steady background stream for the whole session
//! - Fire bursts at randomized intervals from the foreground loop
//!
//! # Design Decisions
//! - The steady stream runs at a lower rate than its standalone default so
//!   bursts have headroom; both streams hit the target concurrently with no
//!   ordering guarantee between them
//! - The background stream is handed back as a `BackgroundTask` rather than
//!   joined: the orchestrator's contract ends when its own loop exits, the
//!   process exit reclaims the task, and tests can await or cancel the
//!   handle deterministically
//! - Per-request failures in either stream are absorbed by the executor and
//!   never terminate the session

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::config::{GeneratorConfig, MixedConfig, SteadyConfig};
use crate::lifecycle::BackgroundTask;
use crate::traffic::burst::BurstGenerator;
use crate::traffic::catalog::EndpointCatalog;
use crate::traffic::executor::RequestExecutor;
use crate::traffic::random::{RandomSource, SystemRandom};
use crate::traffic::session::{GenerationMode, GenerationSession};
use crate::traffic::steady::SteadyGenerator;

pub struct MixedOrchestrator<R = SystemRandom> {
    executor: Arc<RequestExecutor>,
    catalog: Arc<EndpointCatalog>,
    burst: BurstGenerator,
    config: MixedConfig,
    jitter: (f64, f64),
    rng: R,
}

impl MixedOrchestrator<SystemRandom> {
    pub fn new(
        executor: Arc<RequestExecutor>,
        catalog: Arc<EndpointCatalog>,
        config: &GeneratorConfig,
    ) -> Self {
        Self::with_random(executor, catalog, config, SystemRandom)
    }
}

impl<R: RandomSource + Clone + Send + 'static> MixedOrchestrator<R> {
    pub fn with_random(
        executor: Arc<RequestExecutor>,
        catalog: Arc<EndpointCatalog>,
        config: &GeneratorConfig,
        rng: R,
    ) -> Self {
        let burst = BurstGenerator::new(executor.clone(), catalog.clone(), config.burst.clone());

        Self {
            executor,
            catalog,
            burst,
            config: config.mixed.clone(),
            jitter: (config.steady.jitter_min_secs, config.steady.jitter_max_secs),
            rng,
        }
    }

    /// Run one mixed session.
    ///
    /// Returns the handle of the background steady stream, still running if
    /// its own budget has not expired. Dropping the handle detaches it.
    pub async fn run(mut self, duration: Duration) -> BackgroundTask {
        let session = GenerationSession::new(
            GenerationMode::Mixed,
            Some(duration),
            Some(self.config.background_rpm),
        );
        tracing::info!(
            mode = session.mode.as_str(),
            duration_secs = duration.as_secs_f64(),
            background_rpm = self.config.background_rpm,
            "mixed traffic starting: steady background stream plus periodic bursts"
        );

        let steady = SteadyGenerator::with_random(
            self.executor.clone(),
            self.catalog.clone(),
            SteadyConfig {
                target_rpm: self.config.background_rpm,
                jitter_min_secs: self.jitter.0,
                jitter_max_secs: self.jitter.1,
            },
            self.rng.clone(),
        );
        let background = BackgroundTask::spawn("steady-background", async move {
            steady.run(duration).await;
        });

        while !session.expired() {
            let pause = self.rng.uniform(
                self.config.burst_pause_min_secs,
                self.config.burst_pause_max_secs,
            );
            time::sleep(Duration::from_secs_f64(pause)).await;

            if session.expired() {
                break;
            }
            tracing::info!("generating traffic burst");
            self.burst.run().await;
        }

        tracing::info!(
            elapsed_secs = session.elapsed().as_secs_f64(),
            "mixed traffic session complete"
        );
        background
    }
}
