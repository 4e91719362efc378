//! Deterministic seeded RNG for scenario generation.
//!
//! The simulation loop itself is deterministic and draws no random numbers.
//! `SimRng` is used at setup time (e.g. distributing occupants over a
//! generated layout), so the same seed always yields the same building.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded simulation-level RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
