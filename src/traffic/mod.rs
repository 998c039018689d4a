//! Traffic generation engine.
//!
//! # Data Flow
//! ```text
//! Preflight Checker (one synchronous probe, fatal on failure)
//!     → Mixed Orchestrator
//!         → Steady Generator (background task, rate-converging loop)
//!         → Burst Generator (foreground, bounded worker pool)
//!             → Weighted Selector (endpoint catalog)
//!             → Request Executor (GET, classify, report)
//!                 → OutcomeSink + metrics
//! ```
//!
//! # Design Decisions
//! - No shared mutable state between the two traffic streams; each outcome
//!   is local to its request and reported immediately
//! - Every sleep and network call is a suspension point; loops stop only by
//!   observing their own duration budget
//! - All randomness flows through the injectable `RandomSource`

pub mod burst;
pub mod catalog;
pub mod executor;
pub mod mixed;
pub mod preflight;
pub mod random;
pub mod report;
pub mod session;
pub mod steady;

pub use burst::BurstGenerator;
pub use catalog::{Endpoint, EndpointCatalog};
pub use executor::{Classification, RequestExecutor, RequestOutcome};
pub use mixed::MixedOrchestrator;
pub use preflight::{PreflightChecker, PreflightError};
pub use random::{RandomSource, SystemRandom};
pub use report::{ConsoleSink, OutcomeSink};
pub use session::{GenerationMode, GenerationSession};
pub use steady::SteadyGenerator;
