//! Injectable randomness for subject selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Chooses an index uniformly from `0..len`.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Returns `None` when `len` is zero.
    fn pick(&self, len: usize) -> Option<usize>;
}

/// [`RandomSource`] backed by a standard RNG.
///
/// Seed it with [`StdRandomSource::seeded`] for reproducible picks.
pub struct StdRandomSource {
    rng: Mutex<StdRng>,
}

impl StdRandomSource {
    /// RNG seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// RNG with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for StdRandomSource {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

impl RandomSource for StdRandomSource {
    fn pick(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Some(rng.random_range(0..len))
    }
}
