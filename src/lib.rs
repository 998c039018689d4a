//! Synthetic Traffic Generator Library
//!
//! A weighted, multi-pattern HTTP load generator paired with an
//! instrumented demo service, built with Tokio and Axum.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod service;
pub mod traffic;

pub use config::GeneratorConfig;
pub use lifecycle::BackgroundTask;
pub use traffic::{Classification, RequestExecutor, RequestOutcome};
