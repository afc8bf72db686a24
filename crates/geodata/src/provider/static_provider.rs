//! In-memory country store built once at startup.
//!
//! Holds every record in `Arc`s with lookup maps by id and by display name.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::identifiers::CountryIdentifier;
use crate::models::{types::*, Country, CountryStore, Locale};

/// Lowercased, trimmed form used as the name-index key.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// In-memory country store with id and name indices
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone, Debug, Default)]
pub struct StaticCountryStore {
    // Sorted by English name
    countries: Vec<Arc<Country>>,

    // Lookup maps
    id_map: HashMap<CountryIdentifier, Arc<Country>>,
    name_map: HashMap<Locale, HashMap<String, Arc<Country>>>,
}

impl StaticCountryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded records.
    ///
    /// Fails on the first repeated identifier.
    pub fn from_countries(countries: Vec<Country>) -> Result<Self> {
        let mut countries: Vec<Arc<Country>> = countries.into_iter().map(Arc::new).collect();
        countries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let mut id_map = HashMap::with_capacity(countries.len());
        for country in &countries {
            if id_map.insert(country.id.clone(), country.clone()).is_some() {
                return Err(GeoDataError::DuplicateCountry(country.id.clone()));
            }
        }

        let mut name_map: HashMap<Locale, HashMap<String, Arc<Country>>> = HashMap::new();
        for country in &countries {
            name_map
                .entry(Locale::En)
                .or_default()
                .entry(normalize_name(&country.name))
                .or_insert_with(|| country.clone());

            for (locale, name) in &country.localized_names {
                name_map
                    .entry(*locale)
                    .or_default()
                    .entry(normalize_name(name))
                    .or_insert_with(|| country.clone());
            }
        }

        info!(countries = countries.len(), "built country store");

        Ok(Self {
            countries,
            id_map,
            name_map,
        })
    }
}

impl CountryStore for StaticCountryStore {
    fn lookup(&self, id: &CountryIdentifier) -> Option<Arc<Country>> {
        self.id_map.get(id).cloned()
    }

    fn find_by_name(&self, name: &str, locale: Locale) -> Option<Arc<Country>> {
        let key = normalize_name(name);

        self.name_map
            .get(&locale)
            .and_then(|names| names.get(&key))
            .or_else(|| self.name_map.get(&Locale::En).and_then(|names| names.get(&key)))
            .cloned()
    }

    fn list_all(&self) -> Vec<Arc<Country>> {
        self.countries.clone()
    }

    fn len(&self) -> usize {
        self.countries.len()
    }
}
