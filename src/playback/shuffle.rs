//! Random index selection for shuffled `next()`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks a track index in `[0, len)`. Callers never pass `len == 0`.
pub trait IndexPicker {
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform picker over any `rand` generator.
pub struct RandomPicker<R> {
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPicker<StdRng> {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic sequence, for tests and reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> IndexPicker for RandomPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_stay_in_range() {
        let mut p = RandomPicker::seeded(7);
        for len in 1..20 {
            for _ in 0..50 {
                assert!(p.pick(len) < len);
            }
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomPicker::seeded(42);
        let mut b = RandomPicker::seeded(42);
        let xs: Vec<usize> = (0..32).map(|_| a.pick(10)).collect();
        let ys: Vec<usize> = (0..32).map(|_| b.pick(10)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn single_track_always_picks_zero() {
        let mut p = RandomPicker::seeded(1);
        assert!((0..10).all(|_| p.pick(1) == 0));
    }
}
