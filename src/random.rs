use std::sync::Mutex;

use rand::{rngs::StdRng, Rng, SeedableRng};

use anyhow::Result;

pub const MIN_NUMBER: i32 = 1;
pub const MAX_NUMBER: i32 = 100;

/// Source of the hidden number for a round. Implementations should return a
/// value uniformly distributed in `MIN_NUMBER..=MAX_NUMBER`.
pub trait RandomNumberSource: Send + Sync {
    fn next_number(&self) -> Result<i32>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomNumberSource for ThreadRandom {
    fn next_number(&self) -> Result<i32> {
        return Ok(rand::thread_rng().gen_range(MIN_NUMBER..=MAX_NUMBER));
    }
}

/// Reproducible sequence of numbers, for demos and load tests.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        return Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        };
    }
}

impl RandomNumberSource for SeededRandom {
    fn next_number(&self) -> Result<i32> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| anyhow::anyhow!("seeded random source poisoned"))?;

        return Ok(rng.gen_range(MIN_NUMBER..=MAX_NUMBER));
    }
}
