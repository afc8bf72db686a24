use std::sync::Arc;

use geo::MultiPolygon;
use tracing::debug;
use geojson::{Feature, FeatureCollection};
use worldle_geodata::{
    Country, CountryIdentifier, CountryStore, anonymous_outline_feature, outline_feature,
};

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::selection::MysterySelector;
use crate::session::{GameSession, GuessResult};

/// Entry point for a front-end: shares one store across any number of sessions.
#[derive(Clone)]
pub struct Game {
    store: Arc<dyn CountryStore>,
    config: GameConfig,
}

impl Game {
    pub fn new(store: Arc<dyn CountryStore>, config: GameConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn CountryStore {
        self.store.as_ref()
    }

    pub fn new_session(&self, selector: &mut dyn MysterySelector) -> Result<GameSession> {
        let mystery = selector
            .select(self.store.as_ref())
            .ok_or(GameError::NoCountries)?;

        Ok(GameSession::new(mystery, self.config.distance_unit))
    }

    /// Resolve a typed or picked name and submit it.
    pub fn submit_guess(&self, session: &mut GameSession, name: &str) -> Result<GuessResult> {
        if session.is_over() {
            return Err(GameError::GameAlreadyOver(session.outcome()));
        }

        let country = self
            .store
            .find_by_name(name, self.config.locale)
            .ok_or_else(|| GameError::UnknownCountry(name.trim().to_owned()))?;

        debug!(name, id = %country.id, "resolved guess");
        session.submit_guess(self.store.as_ref(), &country.id)
    }

    pub fn display_name<'a>(&self, country: &'a Country) -> &'a str {
        country.display_name(self.config.locale)
    }

    /// Every country that can be guessed, sorted by name in the configured locale.
    pub fn country_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .store
            .list_all()
            .iter()
            .filter(|c| c.is_playable() || self.config.include_dependencies)
            .map(|c| self.display_name(c).to_owned())
            .collect();

        names.sort();
        names
    }

    pub fn outline(&self, id: &CountryIdentifier) -> Result<MultiPolygon> {
        self.lookup(id).map(|c| c.boundary.clone())
    }

    pub fn outline_geojson(&self, id: &CountryIdentifier) -> Result<Feature> {
        self.lookup(id)
            .map(|c| outline_feature(&c, self.config.locale))
    }

    /// The mystery's outline without its name, id or centroid.
    pub fn mystery_outline_geojson(&self, session: &GameSession) -> Feature {
        anonymous_outline_feature(&session.mystery().boundary)
    }

    /// Named outlines of every guess so far, in guess order.
    ///
    /// With `reveal` the mystery country is appended as the last feature.
    pub fn guesses_geojson(&self, session: &GameSession, reveal: bool) -> FeatureCollection {
        let mut features: Vec<Feature> = session
            .guesses()
            .iter()
            .map(|g| outline_feature(&g.country, self.config.locale))
            .collect();

        if reveal {
            features.push(outline_feature(session.mystery(), self.config.locale));
        }

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    fn lookup(&self, id: &CountryIdentifier) -> Result<Arc<Country>> {
        self.store
            .lookup(id)
            .ok_or_else(|| GameError::UnknownCountry(id.to_string()))
    }
}
