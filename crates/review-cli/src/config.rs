//! Configuration file loading for the review CLI.
//!
//! Settings live in `review.toml` in the working directory; a missing file
//! means defaults. Command-line flags override file values.

use std::path::{Path, PathBuf};

use engine_session::EngineDialect;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings loaded from `review.toml`; every field is optional.
#[derive(Debug, Deserialize)]
pub struct ReviewFileConfig {
    /// Engine command line: program followed by arguments.
    /// Defaults to "stockfish" (assumes it's in PATH).
    #[serde(default = "default_engine")]
    pub engine: String,
    /// Search depth per move.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Read timeout in milliseconds; absent means block indefinitely.
    #[serde(default)]
    pub read_timeout_ms: Option<u64>,
    /// Replay the full move prefix instead of each move in isolation.
    #[serde(default)]
    pub cumulative: bool,
    /// Protocol vocabulary overrides for non-UCI engines.
    #[serde(default)]
    pub dialect: EngineDialect,
}

fn default_engine() -> String {
    "stockfish".to_string()
}

fn default_depth() -> u32 {
    15
}

impl Default for ReviewFileConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            depth: default_depth(),
            read_timeout_ms: None,
            cumulative: false,
            dialect: EngineDialect::default(),
        }
    }
}

impl ReviewFileConfig {
    /// Loads the configuration from disk, or defaults if the file at
    /// [`Self::config_path()`] does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read,
    /// or [`ConfigError::Parse`] if it contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path())
    }

    /// Loads the configuration from an explicit path, or defaults if the
    /// file does not exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the path of the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("review.toml")
    }
}
