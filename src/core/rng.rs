//! Deterministic random engine for course generation.
//!
//! Wraps `ChaCha8Rng` so identical seeds produce identical courses on every
//! platform. Nothing in the crate touches an ambient RNG: every component
//! takes a `GameRng` (or a child split off with [`GameRng::derive`])
//! explicitly, and the order of draws is part of the reproducibility
//! contract — inserting or removing a single draw changes every course a
//! seed produces from that point on.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded random engine with sub-stream derivation.
#[derive(Clone, Debug)]
pub struct GameRng(ChaCha8Rng);

impl GameRng {
    /// Create an engine from a `u64` seed.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Next raw draw from the stream.
    pub fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    /// Uniform integer in `[lo, hi]`, both bounds inclusive.
    pub fn integer(&mut self, lo: i32, hi: i32) -> i32 {
        self.0.gen_range(lo..=hi)
    }

    /// Uniform real in `[lo, hi)`.
    pub fn real(&mut self, lo: f64, hi: f64) -> f64 {
        self.0.gen_range(lo..hi)
    }

    /// Uniform choice from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.0.gen_range(0..items.len())]
    }

    /// Uniform in-place permutation.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }

    /// Split off an independent child engine seeded from this one.
    ///
    /// Consumes exactly one `next_u32` from the parent stream, so deriving
    /// a child is itself an ordered draw.
    pub fn derive(&mut self) -> GameRng {
        GameRng::seed_from_u64(self.next_u32() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = GameRng::seed_from_u64(42);
        let mut b = GameRng::seed_from_u64(42);
        let vals_a: Vec<u32> = (0..20).map(|_| a.next_u32()).collect();
        let vals_b: Vec<u32> = (0..20).map(|_| b.next_u32()).collect();
        assert_eq!(vals_a, vals_b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = GameRng::seed_from_u64(1);
        let mut b = GameRng::seed_from_u64(2);
        let vals_a: Vec<u32> = (0..10).map(|_| a.next_u32()).collect();
        let vals_b: Vec<u32> = (0..10).map(|_| b.next_u32()).collect();
        assert_ne!(vals_a, vals_b);
    }

    #[test]
    fn test_integer_bounds_inclusive() {
        let mut rng = GameRng::seed_from_u64(7);
        let mut seen_lo = false;
        let mut seen_hi = false;
        for _ in 0..1000 {
            let v = rng.integer(0, 7);
            assert!((0..=7).contains(&v));
            seen_lo |= v == 0;
            seen_hi |= v == 7;
        }
        assert!(seen_lo && seen_hi, "both bounds should be reachable");
    }

    #[test]
    fn test_real_range() {
        let mut rng = GameRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rng.real(0.0, 1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_pick_stays_in_slice() {
        let mut rng = GameRng::seed_from_u64(3);
        let items = [-1, 1];
        for _ in 0..100 {
            let v = *rng.pick(&items);
            assert!(v == -1 || v == 1);
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::seed_from_u64(9);
        let mut items: Vec<u32> = (0..32).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..32).collect::<Vec<u32>>());
    }

    #[test]
    fn test_derive_is_deterministic() {
        let mut a = GameRng::seed_from_u64(5);
        let mut b = GameRng::seed_from_u64(5);
        let mut child_a = a.derive();
        let mut child_b = b.derive();
        assert_eq!(child_a.next_u32(), child_b.next_u32());
    }

    #[test]
    fn test_derive_child_independent_of_parent_use() {
        // A derived child's stream depends only on the parent draws made
        // before the derive, not on what the parent does afterwards.
        let mut a = GameRng::seed_from_u64(5);
        let mut child_a = a.derive();
        let _ = a.next_u32();
        let from_a: Vec<u32> = (0..5).map(|_| child_a.next_u32()).collect();

        let mut b = GameRng::seed_from_u64(5);
        let mut child_b = b.derive();
        let from_b: Vec<u32> = (0..5).map(|_| child_b.next_u32()).collect();
        assert_eq!(from_a, from_b);
    }
}
