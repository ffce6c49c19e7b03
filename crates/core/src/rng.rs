//! RNG module - bag shape randomizer
//!
//! The bag holds the shape indices not yet dispensed in the current cycle.
//! Each draw removes a uniformly chosen remaining index; an empty bag is
//! refilled with all seven. Any seven draws starting from a fresh refill
//! therefore yield every shape exactly once.
//!
//! Also provides a simple LCG so a seed fully determines a game.

use arrayvec::ArrayVec;

use crate::types::SHAPE_COUNT;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max). `max == 0` yields 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // The low bits of an LCG have short periods; use the high half.
        (self.next_u32() >> 16) % max
    }
}

/// Shape bag: the subset of catalog indices not dispensed this cycle.
#[derive(Debug, Clone)]
pub struct ShapeBag {
    remaining: ArrayVec<u8, SHAPE_COUNT>,
}

impl ShapeBag {
    /// Create a full bag
    pub fn new() -> Self {
        let mut bag = Self {
            remaining: ArrayVec::new(),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.remaining.clear();
        for idx in 0..SHAPE_COUNT as u8 {
            self.remaining.push(idx);
        }
    }

    /// Draw the next shape index, refilling first if the bag is empty.
    pub fn next(&mut self, rng: &mut SimpleRng) -> usize {
        if self.remaining.is_empty() {
            self.refill();
        }
        let pick = rng.next_range(self.remaining.len() as u32) as usize;
        self.remaining.swap_remove(pick) as usize
    }

    /// Indices still in the bag, in no particular order.
    pub fn remaining(&self) -> &[u8] {
        &self.remaining
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

impl Default for ShapeBag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..20 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut rng = SimpleRng::new(1);
        let mut bag = ShapeBag::new();

        let mut drawn: Vec<usize> = (0..7).map(|_| bag.next(&mut rng)).collect();
        drawn.sort_unstable();
        assert_eq!(drawn, vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_bag_refills_when_empty() {
        let mut rng = SimpleRng::new(99);
        let mut bag = ShapeBag::new();
        for _ in 0..7 {
            bag.next(&mut rng);
        }

        let eighth = bag.next(&mut rng);
        assert!(eighth < SHAPE_COUNT);
        assert_eq!(bag.len(), 6);
        assert!(!bag.remaining().contains(&(eighth as u8)));
    }

    #[test]
    fn test_bag_never_repeats_within_cycle() {
        let mut rng = SimpleRng::new(4242);
        let mut bag = ShapeBag::new();

        for _ in 0..10 {
            let mut seen = [false; SHAPE_COUNT];
            for _ in 0..SHAPE_COUNT {
                let idx = bag.next(&mut rng);
                assert!(!seen[idx], "shape {} drawn twice in one cycle", idx);
                seen[idx] = true;
            }
        }
    }
}
