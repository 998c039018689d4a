//! Lifecycle management subsystem.
//!
//! # Design Decisions
//! - The engine has exactly one long-lived concurrent unit (the background
//!   steady stream), so the primitive here is a named task handle, not a
//!   broadcast shutdown fan-out
//! - Detachment is the production behavior; deterministic join/cancel
//!   exists for tests

pub mod background;

pub use background::BackgroundTask;
