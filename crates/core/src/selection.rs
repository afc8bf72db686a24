//! Choosing the mystery country.

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use worldle_geodata::{Country, CountryIdentifier, CountryStore};

pub trait MysterySelector {
    /// Pick the mystery for a new game, or `None` if nothing qualifies.
    fn select(&mut self, store: &dyn CountryStore) -> Option<Arc<Country>>;
}

/// Uniform draw over playable countries.
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Same seed, same store: same sequence of mysteries.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl MysterySelector for RandomSelector {
    fn select(&mut self, store: &dyn CountryStore) -> Option<Arc<Country>> {
        store.random_country(&mut self.rng)
    }
}

/// Always the same country.
#[derive(Clone, Debug)]
pub struct FixedSelector(pub CountryIdentifier);

impl MysterySelector for FixedSelector {
    fn select(&mut self, store: &dyn CountryStore) -> Option<Arc<Country>> {
        store.lookup(&self.0).filter(|c| c.is_playable())
    }
}
