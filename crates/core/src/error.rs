use worldle_geodata::{CountryIdentifier, GeoDataError, InvalidCoordinate};

use crate::session::GameOutcome;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Centroid data out of range: a dataset problem, not a player mistake.
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    #[error("Already guessed: {0}")]
    AlreadyGuessed(CountryIdentifier),

    #[error("Game already over: {0}")]
    GameAlreadyOver(GameOutcome),

    #[error("No playable country available")]
    NoCountries,

    #[error(transparent)]
    Data(#[from] GeoDataError),
}

impl GameError {
    /// Whether the player can simply try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::UnknownCountry(_) | GameError::AlreadyGuessed(_) | GameError::GameAlreadyOver(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
