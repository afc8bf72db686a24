use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, info};
use worldle_geodata::{Country, CountryIdentifier, CountryStore};

use crate::error::{GameError, Result};
use crate::scoring::{self, DistanceUnit, Score};

/// Guesses allowed per game
pub const MAX_ATTEMPTS: u8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    Won,
    Lost,
}

#[derive(Clone, Debug)]
pub struct GuessRecord {
    pub country: Arc<Country>,
    pub score: Score,
}

/// What a guess produced, as reported back to the player.
#[derive(Clone, Debug)]
pub struct GuessResult {
    pub country: Arc<Country>,
    pub score: Score,
    pub remaining: u8,
    pub outcome: GameOutcome,
}

impl GuessResult {
    pub fn distance(&self) -> f64 {
        self.score.distance
    }

    pub fn bearing(&self) -> f64 {
        self.score.bearing
    }

    pub fn proximity(&self) -> f64 {
        self.score.proximity
    }
}

/// One game: a mystery country and up to six guesses at it.
///
/// Once won or lost the session rejects every further guess.
#[derive(Clone, Debug)]
pub struct GameSession {
    mystery: Arc<Country>,
    guesses: Vec<GuessRecord>,
    remaining: u8,
    outcome: GameOutcome,
    unit: DistanceUnit,
}

impl GameSession {
    pub fn new(mystery: Arc<Country>, unit: DistanceUnit) -> Self {
        info!(mystery = %mystery.id, "starting game");

        Self {
            mystery,
            guesses: Vec::with_capacity(MAX_ATTEMPTS as usize),
            remaining: MAX_ATTEMPTS,
            outcome: GameOutcome::InProgress,
            unit,
        }
    }

    pub fn mystery(&self) -> &Arc<Country> {
        &self.mystery
    }

    pub fn guesses(&self) -> &[GuessRecord] {
        &self.guesses
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    pub fn is_over(&self) -> bool {
        self.outcome != GameOutcome::InProgress
    }

    pub fn has_guessed(&self, id: &CountryIdentifier) -> bool {
        self.guesses.iter().any(|g| &g.country.id == id)
    }

    /// Score `id` against the mystery country and advance the game.
    ///
    /// Nothing is recorded when this fails.
    pub fn submit_guess(
        &mut self,
        store: &dyn CountryStore,
        id: &CountryIdentifier,
    ) -> Result<GuessResult> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver(self.outcome));
        }

        let country = store
            .lookup(id)
            .ok_or_else(|| GameError::UnknownCountry(id.to_string()))?;

        if self.has_guessed(&country.id) {
            return Err(GameError::AlreadyGuessed(country.id.clone()));
        }

        let score = if country.id == self.mystery.id {
            Score::exact(self.unit)
        } else {
            scoring::score(
                country.centroid.to_point(),
                self.mystery.centroid.to_point(),
                self.unit,
            )?
        };

        self.guesses.push(GuessRecord {
            country: country.clone(),
            score,
        });

        if country.id == self.mystery.id {
            self.outcome = GameOutcome::Won;
            info!(mystery = %self.mystery.id, guesses = self.guesses.len(), "game won");
        } else {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.outcome = GameOutcome::Lost;
                info!(mystery = %self.mystery.id, "game lost");
            }
        }

        debug!(
            guess = %country.id,
            distance = score.distance,
            bearing = score.bearing,
            proximity = score.proximity,
            remaining = self.remaining,
            "scored guess"
        );

        Ok(GuessResult {
            country,
            score,
            remaining: self.remaining,
            outcome: self.outcome,
        })
    }
}
