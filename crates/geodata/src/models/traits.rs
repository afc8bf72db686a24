//! Query interface for country data.
//!
//! The game only ever reads through this trait, so a store can be in-memory,
//! database-backed, or a small fixture in tests.

use std::sync::Arc;

use rand::seq::IndexedRandom;
use rand::RngCore;

use crate::identifiers::CountryIdentifier;
use crate::models::country::Country;
use crate::models::locale::Locale;

/// Read-only store of country records, loaded once and shared across sessions.
pub trait CountryStore: Send + Sync {
    // ---- Lookups ----
    fn lookup(&self, id: &CountryIdentifier) -> Option<Arc<Country>>;

    /// Case-insensitive name lookup in `locale`, falling back to English names
    fn find_by_name(&self, name: &str, locale: Locale) -> Option<Arc<Country>>;

    // ---- Collections ----

    /// All countries, ordered by English name
    fn list_all(&self) -> Vec<Arc<Country>>;

    fn len(&self) -> usize {
        self.list_all().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ---- Draws ----

    /// Uniformly pick one playable country
    fn random_country(&self, rng: &mut dyn RngCore) -> Option<Arc<Country>> {
        let candidates: Vec<Arc<Country>> = self
            .list_all()
            .into_iter()
            .filter(|c| c.is_playable())
            .collect();

        candidates.choose(rng).cloned()
    }
}
