//! # Random Source
//!
//! The only place randomness enters the engine. The sampler asks for two
//! things: a sort seed and a uniform index below some bound.
//!
//! Implementations take `&self` and must not hold an RNG across an await
//! point, so a sampling future stays `Send`.

use crate::primitives::SEED_RANGE;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Source of uniform random draws.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `[0, bound)`. `bound` is never zero.
    fn below(&self, bound: u64) -> u64;

    /// Fresh sort seed in `[0, SEED_RANGE)`.
    fn sort_seed(&self) -> u64 {
        self.below(SEED_RANGE)
    }
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, bound: u64) -> u64 {
        rand::thread_rng().gen_range(0..bound.max(1))
    }
}

/// Reproducible source: the same seed yields the same sequence of draws.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Create a source seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn below(&self, bound: u64) -> u64 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..bound.max(1))
    }
}
