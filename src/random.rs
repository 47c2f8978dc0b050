//! The random source every composer draws from.
//!
//! There is no global generator. Callers hand a [`RandomSource`] to each
//! composition call; any [`rand::Rng`] qualifies, so a seeded
//! [`SmallRng`] gives reproducible backdrops and [`from_entropy`] gives the
//! usual "different every run" behaviour.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform draws, in the three shapes the composers need.
pub trait RandomSource {
    /// Uniform integer in `[lo, hi]`, both ends inclusive. Returns `lo`
    /// without drawing when `hi <= lo`.
    fn uniform_int(&mut self, lo: i64, hi: i64) -> i64;

    /// Uniform float in `[lo, hi)`. Returns `lo` without drawing when the
    /// range is empty.
    fn uniform_float(&mut self, lo: f64, hi: f64) -> f64;

    /// Pick one element uniformly, `None` for an empty slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_int(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        self.gen_range(lo..=hi)
    }

    fn uniform_float(&mut self, lo: f64, hi: f64) -> f64 {
        // Also catches NaN bounds.
        if !(hi > lo) {
            return lo;
        }
        self.gen_range(lo..hi)
    }

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.gen_range(0..items.len()))
    }
}

/// A small, fast generator with a fixed seed. Same seed, same backdrop.
pub fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// A generator seeded from OS entropy.
pub fn from_entropy() -> SmallRng {
    SmallRng::from_entropy()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_uniform_int_is_inclusive() {
        let mut rng = seeded(12345);
        let mut seen = [false; 3];
        for _ in 0..1000 {
            let v = rng.uniform_int(3, 5);
            assert!((3..=5).contains(&v));
            seen[(v - 3) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_degenerate_ranges() {
        let mut rng = seeded(1);
        assert_eq!(rng.uniform_int(7, 7), 7);
        assert_eq!(rng.uniform_int(9, 2), 9);
        assert_eq!(rng.uniform_float(4.0, 4.0), 4.0);
        assert!(rng.uniform_float(f64::NAN, 1.0).is_nan());
    }

    #[test]
    fn test_uniform_float_half_open() {
        let mut rng = seeded(99);
        for _ in 0..1000 {
            let v = rng.uniform_float(0.0, 360.0);
            assert!((0.0..360.0).contains(&v));
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = seeded(7);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        let items = ["circle", "square", "triangle"];
        for _ in 0..100 {
            assert!(items.contains(rng.choose(&items).unwrap()));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a: Vec<i64> = {
            let mut rng = seeded(42);
            (0..16).map(|_| rng.uniform_int(0, 1_000_000)).collect()
        };
        let b: Vec<i64> = {
            let mut rng = seeded(42);
            (0..16).map(|_| rng.uniform_int(0, 1_000_000)).collect()
        };
        assert_eq!(a, b);
    }
}
