//! Conversion settings.
//!
//! Values are layered: built-in defaults, then an optional JSON config file,
//! then command-line flags (applied by the binary).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// What to do when an input theme file does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingInputPolicy {
    /// Abort the run.
    Fail,
    /// Warn and continue with the next file.
    Skip,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Batch mode: the numbered theme files packed into one output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// File name prefix; inputs are `<prefix><NN>.json`.
    pub prefix: String,
    /// Number of candidate files, numbered from 00.
    pub count: usize,
    pub output: PathBuf,
    pub on_missing: MissingInputPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            prefix: "theme_".to_string(),
            count: 4,
            output: PathBuf::from("themes.bin"),
            on_missing: MissingInputPolicy::Skip,
        }
    }
}

impl BatchConfig {
    /// Candidate input files in index order, zero-padded to two digits.
    pub fn input_paths(&self) -> Vec<PathBuf> {
        (0..self.count)
            .map(|i| PathBuf::from(format!("{}{:02}.json", self.prefix, i)))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub batch: BatchConfig,
    /// Required encoded size of every theme. The watch indexes the packed
    /// file as `theme_id * theme_bytes`, so all themes must be equally long.
    pub theme_bytes: Option<usize>,
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
