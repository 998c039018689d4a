//! Injectable randomness.
//!
//! Every random decision in the engine (endpoint selection, jitter sleeps,
//! inter-burst pauses) goes through [`RandomSource`] so tests can script
//! exact sequences and assert selection and timing outcomes.

use rand::Rng;

/// Source of uniform random draws.
pub trait RandomSource: Send {
    /// Draw a uniform value in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;
}

/// Production source backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        // Degenerate bounds come up when jitter is configured to a point
        // value; gen_range rejects empty ranges.
        if lo >= hi {
            return lo;
        }
        rand::thread_rng().gen_range(lo..hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_bounds() {
        let mut rng = SystemRandom;
        for _ in 0..1000 {
            let v = rng.uniform(0.5, 2.0);
            assert!((0.5..2.0).contains(&v));
        }
    }

    #[test]
    fn point_bounds_return_the_bound() {
        let mut rng = SystemRandom;
        assert_eq!(rng.uniform(1.5, 1.5), 1.5);
    }
}
