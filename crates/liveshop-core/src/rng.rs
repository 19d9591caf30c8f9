//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests, a seeded or scripted
//! implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// Production RNG backed by `StdRng`.
#[derive(Debug)]
pub struct SystemRng(StdRng);

impl SystemRng {
    /// Creates an RNG seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates an RNG with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for SystemRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.0.random_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_u32_range_stays_within_inclusive_bounds() {
        let mut rng = SystemRng::seeded(7);

        for _ in 0..1_000 {
            let value = rng.next_u32_range(1, 5);
            assert!((1..=5).contains(&value));
        }
    }

    #[test]
    fn test_seeded_rngs_produce_identical_sequences() {
        let mut a = SystemRng::seeded(42);
        let mut b = SystemRng::seeded(42);

        let left: Vec<u32> = (0..16).map(|_| a.next_u32_range(0, 100)).collect();
        let right: Vec<u32> = (0..16).map(|_| b.next_u32_range(0, 100)).collect();

        assert_eq!(left, right);
    }

    #[test]
    fn test_degenerate_range_returns_the_single_value() {
        let mut rng = SystemRng::seeded(1);
        assert_eq!(rng.next_u32_range(0, 0), 0);
    }
}
