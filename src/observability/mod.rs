//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Both binaries produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and histograms, Prometheus scrape endpoint)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Prometheus scrape of the configured metrics address
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured log level when set
//! - Metric names and label shapes live here so call sites stay one-liners
//! - A failed exporter install is logged and tolerated; observability never
//!   takes the process down

pub mod logging;
pub mod metrics;
