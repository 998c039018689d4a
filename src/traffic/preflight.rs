//! Preflight readiness checking.
//!
//! # Responsibilities
//! - Probe the target's health endpoint once before any generation starts
//! - Survey every catalog endpoint so the operator sees the target's shape
//!
//! # Design Decisions
//! - The health probe is the one fatal condition in the program: a failure
//!   becomes a typed error the binary turns into a diagnostic and exit 1
//! - The survey is informational only; it logs per-endpoint status and
//!   never aborts the run
//! - A dedicated short timeout keeps an unreachable target from stalling
//!   startup for the full traffic timeout

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::PreflightConfig;
use crate::traffic::catalog::EndpointCatalog;

/// Why the target failed its readiness probe.
#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("health endpoint returned status {status}")]
    Unhealthy { status: StatusCode },

    #[error("health check request failed: {0}")]
    Unreachable(#[from] reqwest::Error),
}

/// One-shot readiness prober, run synchronously before any concurrent work.
pub struct PreflightChecker {
    client: Client,
    base_url: Url,
    path: String,
    timeout: Duration,
}

impl PreflightChecker {
    pub fn new(base_url: Url, config: &PreflightConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().no_proxy().build()?;

        Ok(Self {
            client,
            base_url,
            path: config.path.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Probe the health endpoint once.
    pub async fn check(&self) -> Result<(), PreflightError> {
        let url = self
            .base_url
            .join(&self.path)
            .unwrap_or_else(|_| self.base_url.clone());

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(path = %self.path, "target service is healthy");
            Ok(())
        } else {
            Err(PreflightError::Unhealthy { status })
        }
    }

    /// Probe every catalog endpoint once and log the result.
    pub async fn survey(&self, catalog: &EndpointCatalog) {
        tracing::info!("surveying target endpoints");

        for endpoint in catalog.endpoints() {
            let Ok(url) = self.base_url.join(&endpoint.path) else {
                tracing::warn!(path = %endpoint.path, "endpoint path does not form a valid URL");
                continue;
            };

            match self.client.get(url).timeout(self.timeout).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::info!(path = %endpoint.path, status = %response.status(), "endpoint ready");
                }
                Ok(response) => {
                    tracing::warn!(path = %endpoint.path, status = %response.status(), "endpoint returned non-success");
                }
                Err(err) => {
                    tracing::warn!(path = %endpoint.path, error = %err, "endpoint probe failed");
                }
            }
        }
    }
}
