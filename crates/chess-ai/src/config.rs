//! Engine configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::transposition::{TranspositionTable, DEFAULT_CAPACITY};

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The configuration parsed but holds an unusable value.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Transposition table settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TranspositionConfig {
    /// Number of slots. Defaults to 131072.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for TranspositionConfig {
    fn default() -> Self {
        TranspositionConfig {
            capacity: default_capacity(),
        }
    }
}

/// Top-level engine configuration.
///
/// ```toml
/// [transposition]
/// capacity = 262144
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default)]
    pub transposition: TranspositionConfig,
}

impl EngineConfig {
    /// Loads the configuration at `path`, or the defaults if the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be
    /// read, [`ConfigError::ParseError`] if it is not valid TOML, or
    /// [`ConfigError::Invalid`] for a zero table capacity.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parses a configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        if config.transposition.capacity == 0 {
            return Err(ConfigError::Invalid(
                "transposition.capacity must be positive".to_string(),
            ));
        }
        Ok(config)
    }

    /// Allocates a transposition table sized by this configuration.
    pub fn transposition_table(&self) -> TranspositionTable {
        TranspositionTable::new(self.transposition.capacity)
    }
}
