//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GeneratorConfig (validated, immutable)
//!     → passed by value/Arc into each component's constructor
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults so the binaries run with no config file
//! - Validation separates syntactic (serde) from semantic checks
//! - No process-wide mutable configuration: components receive their
//!   section explicitly so tests can point them at a mock target

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BurstConfig, EndpointConfig, GeneratorConfig, MixedConfig, ObservabilityConfig,
    PreflightConfig, ServiceConfig, SteadyConfig, TargetConfig,
};
pub use validation::{validate_config, validate_endpoints, ValidationError};
