//! Seeded random generator for spawn draws.

use gr_core::ports::RandomGenerator;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ChaCha8-backed generator; a fixed seed gives a reproducible match.
#[derive(Debug, Clone)]
pub struct SeededGenerator {
    rng: ChaCha8Rng,
}

impl SeededGenerator {
    /// Generator with a fixed seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomGenerator for SeededGenerator {
    fn generate_probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn generate_double(&mut self, min: f64, max: f64) -> f64 {
        if min < max {
            self.rng.gen_range(min..=max)
        } else {
            min
        }
    }
}
