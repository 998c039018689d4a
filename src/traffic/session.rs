//! Per-call generation session bookkeeping.

use std::time::{Duration, Instant};

/// The traffic pattern a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Burst,
    Steady,
    Mixed,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Burst => "burst",
            GenerationMode::Steady => "steady",
            GenerationMode::Mixed => "mixed",
        }
    }
}

/// Lifetime record of one generation call.
///
/// Created when the call starts and discarded when it returns; nothing is
/// persisted across runs. Burst sessions carry no duration budget or rate.
#[derive(Debug)]
pub struct GenerationSession {
    pub mode: GenerationMode,
    started: Instant,
    duration_budget: Option<Duration>,
    pub target_rpm: Option<f64>,
}

impl GenerationSession {
    pub fn new(
        mode: GenerationMode,
        duration_budget: Option<Duration>,
        target_rpm: Option<f64>,
    ) -> Self {
        Self {
            mode,
            started: Instant::now(),
            duration_budget,
            target_rpm,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// True once the duration budget is spent. Sessions without a budget
    /// never expire on their own.
    pub fn expired(&self) -> bool {
        self.duration_budget
            .is_some_and(|budget| self.started.elapsed() >= budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budgetless_session_never_expires() {
        let session = GenerationSession::new(GenerationMode::Burst, None, None);
        assert!(!session.expired());
    }

    #[test]
    fn session_expires_after_budget() {
        let session = GenerationSession::new(
            GenerationMode::Steady,
            Some(Duration::from_millis(5)),
            Some(30.0),
        );
        assert!(!session.expired());
        std::thread::sleep(Duration::from_millis(10));
        assert!(session.expired());
    }
}
