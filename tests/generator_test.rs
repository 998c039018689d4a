//! Traffic generation tests: burst pooling, steady pacing, mixed sessions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use load_generator::config::{BurstConfig, EndpointConfig, GeneratorConfig, SteadyConfig};
use load_generator::traffic::{
    BurstGenerator, Classification, EndpointCatalog, MixedOrchestrator, SteadyGenerator,
};

mod common;

use common::{MinRandom, MockResponse};

fn single_endpoint_catalog() -> Arc<EndpointCatalog> {
    let endpoints = vec![EndpointConfig {
        path: "/".into(),
        weight: 1.0,
    }];
    Arc::new(EndpointCatalog::from_config(&endpoints).unwrap())
}

#[tokio::test]
async fn burst_runs_workers_in_pooled_rounds() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let addr = common::start_mock_target(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        MockResponse::delayed(Duration::from_millis(200))
    })
    .await;
    let (executor, sink) = common::executor_for(addr, 5);

    let burst = BurstGenerator::new(
        executor,
        single_endpoint_catalog(),
        BurstConfig {
            batch_size: 20,
            pool_size: 10,
            wait_timeout_secs: 10,
        },
    );

    let started = Instant::now();
    let completed = burst.run().await;
    let elapsed = started.elapsed();

    assert_eq!(completed, 20);
    assert_eq!(hits.load(Ordering::SeqCst), 20);
    assert_eq!(sink.outcomes().len(), 20);
    // 20 requests of ~200ms through a pool of 10 means ~2 rounds, nowhere
    // near 20 sequential round trips.
    assert!(elapsed >= Duration::from_millis(300), "finished too fast: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(2), "not pooled: {elapsed:?}");
}

#[tokio::test]
async fn burst_abandons_workers_that_miss_the_wait_timeout() {
    let addr = common::start_mock_target(|_| MockResponse::delayed(Duration::from_secs(10))).await;
    let (executor, _sink) = common::executor_for(addr, 20);

    let burst = BurstGenerator::new(
        executor,
        single_endpoint_catalog(),
        BurstConfig {
            batch_size: 2,
            pool_size: 2,
            wait_timeout_secs: 1,
        },
    );

    let started = Instant::now();
    let completed = burst.run().await;

    assert_eq!(completed, 0);
    assert!(
        started.elapsed() < Duration::from_secs(4),
        "collection was not bounded: {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn steady_converges_on_the_target_rate() {
    let addr = common::start_mock_target(|_| MockResponse::ok()).await;
    let (executor, sink) = common::executor_for(addr, 2);

    let generator = SteadyGenerator::new(
        executor,
        single_endpoint_catalog(),
        SteadyConfig {
            target_rpm: 600.0,
            jitter_min_secs: 0.01,
            jitter_max_secs: 0.02,
        },
    );

    let issued = generator.run(Duration::from_secs(3)).await;

    // 600 req/min is 10 req/s: ~30 expected over 3s, with tolerance for
    // jitter overhead and scheduling noise.
    assert!((15..=45).contains(&issued), "issued {issued}");
    assert_eq!(sink.outcomes().len() as u64, issued);
}

#[tokio::test]
async fn mixed_session_shorter_than_the_pause_fires_no_bursts() {
    let addr = common::start_mock_target(|_| MockResponse::ok()).await;
    let (executor, sink) = common::executor_for(addr, 2);

    let mut config = GeneratorConfig::default();
    config.mixed.background_rpm = 240.0;
    config.mixed.burst_pause_min_secs = 2.0;
    config.mixed.burst_pause_max_secs = 2.5;
    config.steady.jitter_min_secs = 0.01;
    config.steady.jitter_max_secs = 0.02;

    let orchestrator = MixedOrchestrator::with_random(
        executor,
        single_endpoint_catalog(),
        &config,
        MinRandom,
    );

    let background = orchestrator.run(Duration::from_secs(1)).await;
    background.join().await;

    let outcomes = sink.outcomes();
    // Only the background steady stream ran: one burst alone would have
    // contributed a full batch of 20.
    assert!(!outcomes.is_empty());
    assert!(outcomes.len() < 20, "unexpected burst fired: {}", outcomes.len());
    assert!(outcomes.iter().all(|o| o.classification == Classification::Ok));
}

#[tokio::test]
async fn mixed_session_fires_bursts_between_pauses() {
    let addr = common::start_mock_target(|_| MockResponse::ok()).await;
    let (executor, sink) = common::executor_for(addr, 2);

    let mut config = GeneratorConfig::default();
    config.mixed.background_rpm = 60.0;
    config.mixed.burst_pause_min_secs = 0.2;
    config.mixed.burst_pause_max_secs = 0.3;
    config.steady.jitter_min_secs = 0.01;
    config.steady.jitter_max_secs = 0.02;
    config.burst.batch_size = 5;
    config.burst.pool_size = 5;

    let orchestrator = MixedOrchestrator::with_random(
        executor,
        single_endpoint_catalog(),
        &config,
        MinRandom,
    );

    let background = orchestrator.run(Duration::from_secs(1)).await;
    background.join().await;

    // At least one full burst batch on top of the steady stream.
    assert!(
        sink.outcomes().len() >= 5,
        "expected burst traffic, saw {} requests",
        sink.outcomes().len()
    );
}
