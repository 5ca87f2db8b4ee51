//! Seedable uniform integer source for test generation.
//!
//! Wraps [`rand::rngs::StdRng`]. The default constructor seeds from the wall
//! clock in nanoseconds, so two runs almost never produce the same files; the
//! seed is kept around so a run can be replayed with [`CaseRng::with_seed`].
//!
//! Not cryptographically secure.
//!
//! # Example
//!
//! ```rust
//! use casegen::testgen::rng::CaseRng;
//!
//! let mut rng = CaseRng::with_seed(7);
//! let x = rng.random(-100, 100);
//! assert!((-100..=100).contains(&x));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct CaseRng {
    seed: u64,
    inner: StdRng,
}

impl CaseRng {
    /// Seed from a high-resolution wall-clock reading.
    pub fn from_time() -> Self {
        let now = chrono::Utc::now();
        // timestamp_nanos_opt only fails past year 2262
        let nanos = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros().wrapping_mul(1000));
        Self::with_seed(nanos as u64)
    }

    /// Deterministic generator, for tests and for replaying a logged seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in the inclusive range `[low, high]`.
    ///
    /// Callers guarantee `low <= high`.
    pub fn random(&mut self, low: i64, high: i64) -> i64 {
        debug_assert!(low <= high, "empty range [{}, {}]", low, high);
        self.inner.gen_range(low..=high)
    }

    /// Fair coin, same draw as `random(0, 1) == 1`.
    pub fn coin(&mut self) -> bool {
        self.random(0, 1) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut rng1 = CaseRng::with_seed(12345);
        let mut rng2 = CaseRng::with_seed(12345);

        let values1: Vec<i64> = (0..50).map(|_| rng1.random(-1000, 1000)).collect();
        let values2: Vec<i64> = (0..50).map(|_| rng2.random(-1000, 1000)).collect();
        assert_eq!(values1, values2, "Same seed should produce same sequence");
    }

    #[test]
    fn test_random_stays_in_inclusive_range() {
        let mut rng = CaseRng::with_seed(42);
        let mut saw_low = false;
        let mut saw_high = false;

        for _ in 0..2000 {
            let v = rng.random(-3, 3);
            assert!((-3..=3).contains(&v));
            saw_low |= v == -3;
            saw_high |= v == 3;
        }

        // Both endpoints are reachable
        assert!(saw_low && saw_high);
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = CaseRng::with_seed(0);
        for _ in 0..10 {
            assert_eq!(rng.random(5, 5), 5);
        }
    }

    #[test]
    fn test_wide_range_does_not_overflow() {
        let mut rng = CaseRng::with_seed(u64::MAX);
        let v = rng.random(-1_000_000_000, 1_000_000_000);
        assert!((-1_000_000_000..=1_000_000_000).contains(&v));
    }

    #[test]
    fn test_coin_distribution() {
        let mut rng = CaseRng::with_seed(54321);
        let heads = (0..1000).filter(|_| rng.coin()).count();

        // Wide margin, just catch a stuck coin
        assert!(heads > 300 && heads < 700, "heads = {}", heads);
    }

    #[test]
    fn test_seed_is_reported() {
        assert_eq!(CaseRng::with_seed(99).seed(), 99);

        let rng = CaseRng::from_time();
        let mut replay = CaseRng::with_seed(rng.seed());
        let mut original = rng.clone();
        assert_eq!(original.random(0, 1 << 40), replay.random(0, 1 << 40));
    }
}
