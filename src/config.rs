//! Engine configuration.

use crate::error::ConfigError;
use crate::opponent::OpponentKind;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Name of the scripted opponent unless configured otherwise.
pub const DEFAULT_OPPONENT_NAME: &str = "Kaos";

/// Configuration for a [`SessionEngine`](crate::SessionEngine).
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Reserved name of the scripted opponent in single-participant sessions.
    #[serde(default = "default_opponent_name")]
    opponent_name: String,

    /// Opponent policy.
    #[serde(default)]
    opponent: OpponentKind,

    /// Seed for the random opponent; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Round count used when a caller does not specify one.
    #[serde(default = "default_round_count")]
    default_round_count: usize,

    /// Largest round count accepted at session creation.
    #[serde(default = "default_max_round_count")]
    max_round_count: usize,
}

#[instrument]
fn default_opponent_name() -> String {
    DEFAULT_OPPONENT_NAME.to_string()
}

#[instrument]
fn default_round_count() -> usize {
    3
}

#[instrument]
fn default_max_round_count() -> usize {
    25
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            opponent_name: default_opponent_name(),
            opponent: OpponentKind::default(),
            seed: None,
            default_round_count: default_round_count(),
            max_round_count: default_max_round_count(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text and validates it.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(
            opponent = %config.opponent,
            opponent_name = %config.opponent_name,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Returns a copy with a different opponent policy.
    pub fn with_opponent(mut self, opponent: OpponentKind) -> Self {
        self.opponent = opponent;
        self
    }

    /// Returns a copy with a fixed random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.opponent_name.trim().is_empty() {
            return Err(ConfigError::new("opponent_name must not be empty"));
        }
        if self.max_round_count == 0 {
            return Err(ConfigError::new("max_round_count must be at least 1"));
        }
        if self.default_round_count == 0 || self.default_round_count > self.max_round_count {
            return Err(ConfigError::new(format!(
                "default_round_count must be between 1 and {}",
                self.max_round_count
            )));
        }
        Ok(())
    }
}
