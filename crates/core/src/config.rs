use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use worldle_geodata::{LoadOptions, Locale};

use crate::scoring::DistanceUnit;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Player-facing settings. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Language for country names, both shown and typed
    pub locale: Locale,
    pub distance_unit: DistanceUnit,
    /// Load dependencies and leases so they can be guessed
    pub include_dependencies: bool,
    /// Fixes the mystery draw
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            include_dependencies: self.include_dependencies,
        }
    }
}
