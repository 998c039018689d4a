//! Burst traffic generation.
//!
//! # Responsibilities
//! - Fire a fixed batch of requests through a bounded worker pool
//! - Wait for every worker to complete or abandon it after the wait timeout
//!
//! # Design Decisions
//! - The pool bound is a semaphore: all workers are spawned up front and
//!   excess workers queue for a permit
//! - Collection applies a per-task wait timeout layered on top of each
//!   request's own timeout; a worker that misses it is aborted (never
//!   retried, siblings unaffected), so no task outlives the call
//! - The wait timeout does not account for permit-queuing delay; that
//!   margin stays configurable and is flagged at construction instead of
//!   being silently widened

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time;

use crate::config::BurstConfig;
use crate::traffic::catalog::EndpointCatalog;
use crate::traffic::executor::RequestExecutor;
use crate::traffic::random::SystemRandom;
use crate::traffic::session::{GenerationMode, GenerationSession};

pub struct BurstGenerator {
    executor: Arc<RequestExecutor>,
    catalog: Arc<EndpointCatalog>,
    config: BurstConfig,
}

impl BurstGenerator {
    pub fn new(
        executor: Arc<RequestExecutor>,
        catalog: Arc<EndpointCatalog>,
        config: BurstConfig,
    ) -> Self {
        let wait = Duration::from_secs(config.wait_timeout_secs);
        if wait <= executor.timeout() {
            tracing::warn!(
                wait_timeout_secs = config.wait_timeout_secs,
                request_timeout_secs = executor.timeout().as_secs(),
                "burst wait timeout does not exceed the request timeout; queued workers may be abandoned before they finish"
            );
        }

        Self {
            executor,
            catalog,
            config,
        }
    }

    /// Fire one burst and wait for every worker to finish or be abandoned.
    ///
    /// Returns the number of workers that completed.
    pub async fn run(&self) -> usize {
        let session = GenerationSession::new(GenerationMode::Burst, None, None);
        tracing::info!(
            mode = session.mode.as_str(),
            batch_size = self.config.batch_size,
            pool_size = self.config.pool_size,
            "burst starting"
        );

        let permits = Arc::new(Semaphore::new(self.config.pool_size));
        let mut workers = Vec::with_capacity(self.config.batch_size);
        for _ in 0..self.config.batch_size {
            let permits = permits.clone();
            let executor = self.executor.clone();
            let catalog = self.catalog.clone();
            workers.push(tokio::spawn(async move {
                // The semaphore is never closed while workers hold a clone.
                let Ok(_permit) = permits.acquire_owned().await else {
                    return;
                };
                let mut rng = SystemRandom;
                let path = catalog.sample(&mut rng).path.clone();
                executor.execute(&path).await;
            }));
        }

        let wait = Duration::from_secs(self.config.wait_timeout_secs);
        let mut completed = 0usize;
        for worker in workers {
            let abort = worker.abort_handle();
            match time::timeout(wait, worker).await {
                Ok(Ok(())) => completed += 1,
                Ok(Err(err)) => {
                    tracing::warn!(error = %err, "burst worker failed");
                }
                Err(_) => {
                    // Abandon the straggler; siblings keep running.
                    abort.abort();
                    tracing::warn!(
                        wait_timeout_secs = self.config.wait_timeout_secs,
                        "burst worker exceeded the wait timeout, abandoning"
                    );
                }
            }
        }

        tracing::info!(
            completed,
            batch_size = self.config.batch_size,
            elapsed_secs = session.elapsed().as_secs_f64(),
            "burst complete"
        );
        completed
    }
}
