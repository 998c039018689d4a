//! Request executor classification tests against a scriptable mock target.

use std::time::{Duration, Instant};

use load_generator::traffic::Classification;

mod common;

use common::MockResponse;

#[tokio::test]
async fn classifies_http_statuses() {
    let addr = common::start_mock_target(|path| match path {
        "/ok" => MockResponse::ok(),
        "/missing" => MockResponse::status(404),
        "/boom" => MockResponse::status(500),
        _ => MockResponse::ok(),
    })
    .await;
    let (executor, sink) = common::executor_for(addr, 2);

    assert_eq!(executor.execute("/ok").await.classification, Classification::Ok);
    assert_eq!(
        executor.execute("/missing").await.classification,
        Classification::ClientError
    );
    assert_eq!(
        executor.execute("/boom").await.classification,
        Classification::ServerError
    );

    let outcomes = sink.outcomes();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].status, 200);
    assert_eq!(outcomes[1].status, 404);
    assert_eq!(outcomes[2].status, 500);
}

#[tokio::test]
async fn measures_round_trip_latency() {
    let addr =
        common::start_mock_target(|_| MockResponse::delayed(Duration::from_millis(100))).await;
    let (executor, _sink) = common::executor_for(addr, 2);

    let outcome = executor.execute("/").await;
    assert_eq!(outcome.classification, Classification::Ok);
    assert!(outcome.duration >= Duration::from_millis(100));
    assert!(outcome.duration < Duration::from_secs(1));
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (executor, _sink) = common::executor_for(addr, 2);
    let outcome = executor.execute("/").await;

    assert_eq!(outcome.classification, Classification::TransportError);
    assert_eq!(outcome.status, 500);
    assert_eq!(outcome.duration, Duration::ZERO);
}

#[tokio::test]
async fn slow_target_times_out_within_the_configured_bound() {
    let addr = common::start_mock_target(|_| MockResponse::delayed(Duration::from_secs(10))).await;
    let (executor, sink) = common::executor_for(addr, 1);

    let started = Instant::now();
    let outcome = executor.execute("/").await;

    assert_eq!(outcome.classification, Classification::Timeout);
    assert_eq!(outcome.status, 408);
    // Reported as the configured timeout, not measured elapsed.
    assert_eq!(outcome.duration, Duration::from_secs(1));
    assert!(
        started.elapsed() < Duration::from_secs(3),
        "executor blocked for {:?}",
        started.elapsed()
    );
    assert_eq!(sink.outcomes().len(), 1);
}
