//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use load_generator::config::TargetConfig;
use load_generator::traffic::{OutcomeSink, RandomSource, RequestExecutor, RequestOutcome};

/// Scripted response for one request to the mock target.
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

#[allow(dead_code)]
impl MockResponse {
    pub fn ok() -> Self {
        Self::status(200)
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: "{}".to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::ok()
        }
    }
}

/// Start a mock target on an ephemeral port; `respond` scripts the response
/// per request path.
pub async fn start_mock_target<F>(respond: F) -> SocketAddr
where
    F: Fn(&str) -> MockResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let respond = Arc::new(respond);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let respond = respond.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let mut read = 0usize;
                        // Read up to the end of the request head.
                        loop {
                            match socket.read(&mut buf[read..]).await {
                                Ok(0) => return,
                                Ok(n) => {
                                    read += n;
                                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                                        break;
                                    }
                                    if read == buf.len() {
                                        return;
                                    }
                                }
                                Err(_) => return,
                            }
                        }

                        let head = String::from_utf8_lossy(&buf[..read]);
                        let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();

                        let response = respond(&path);
                        if !response.delay.is_zero() {
                            tokio::time::sleep(response.delay).await;
                        }

                        let reason = match response.status {
                            200 => "OK",
                            404 => "Not Found",
                            408 => "Request Timeout",
                            500 => "Internal Server Error",
                            503 => "Service Unavailable",
                            _ => "OK",
                        };
                        let raw = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            response.status,
                            reason,
                            response.body.len(),
                            response.body
                        );
                        let _ = socket.write_all(raw.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

pub fn base_url(addr: SocketAddr) -> url::Url {
    url::Url::parse(&format!("http://{addr}")).unwrap()
}

/// Sink that retains every outcome for assertions.
#[derive(Default)]
pub struct CollectingSink {
    outcomes: Mutex<Vec<RequestOutcome>>,
}

#[allow(dead_code)]
impl CollectingSink {
    pub fn outcomes(&self) -> Vec<RequestOutcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl OutcomeSink for CollectingSink {
    fn record(&self, outcome: &RequestOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }
}

/// Executor pointed at the mock target, with a collecting sink.
#[allow(dead_code)]
pub fn executor_for(addr: SocketAddr, timeout_secs: u64) -> (Arc<RequestExecutor>, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::default());
    let target = TargetConfig {
        base_url: base_url(addr),
        request_timeout_secs: timeout_secs,
    };
    let executor = RequestExecutor::new(&target, sink.clone()).unwrap();
    (Arc::new(executor), sink)
}

/// Deterministic source: every draw returns the lower bound.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, Default)]
pub struct MinRandom;

impl RandomSource for MinRandom {
    fn uniform(&mut self, lo: f64, _hi: f64) -> f64 {
        lo
    }
}
