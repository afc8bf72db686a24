//! Country reference records.

use std::collections::HashMap;
use std::sync::Arc;

use geo::MultiPolygon;

use crate::identifiers::CountryIdentifier;
use crate::models::locale::Locale;
use crate::models::types::{Centroid, TerritoryKind};

/// A single country or territory: immutable once loaded.
#[derive(Clone, Debug)]
pub struct Country {
    pub id: CountryIdentifier,
    /// English name, always present
    pub name: Arc<str>,
    /// Names in other locales, where the dataset has them
    pub localized_names: HashMap<Locale, Arc<str>>,
    pub kind: TerritoryKind,
    pub boundary: MultiPolygon,
    pub centroid: Centroid,
}

impl Country {
    pub fn new(
        id: impl Into<CountryIdentifier>,
        name: impl AsRef<str>,
        kind: TerritoryKind,
        boundary: MultiPolygon,
        centroid: Centroid,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.as_ref().into(),
            localized_names: HashMap::new(),
            kind,
            boundary,
            centroid,
        }
    }

    pub fn with_name(mut self, locale: Locale, name: impl AsRef<str>) -> Self {
        self.localized_names.insert(locale, name.as_ref().into());
        self
    }

    /// Name in `locale`, falling back to English
    pub fn display_name(&self, locale: Locale) -> &str {
        if locale == Locale::En {
            return &self.name;
        }

        self.localized_names
            .get(&locale)
            .map(|n| n.as_ref())
            .unwrap_or(&self.name)
    }

    pub fn is_playable(&self) -> bool {
        self.kind.is_playable()
    }
}
