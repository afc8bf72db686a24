pub mod config;
pub mod error;
pub mod game;
pub mod scoring;
pub mod selection;
pub mod session;

// Re-export the data crate
pub use worldle_geodata as geodata;

pub use config::{ConfigError, GameConfig};
pub use error::GameError;
pub use game::Game;
pub use scoring::{CompassDirection, DistanceUnit, ProximityTier, Score};
pub use selection::{FixedSelector, MysterySelector, RandomSelector};
pub use session::{GameOutcome, GameSession, GuessRecord, GuessResult, MAX_ATTEMPTS};
