//! Error types for passbar core.

use std::path::PathBuf;
use thiserror::Error;

/// Core result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for passbar core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Presentation error: {0}")]
    Presentation(String),
}

impl Error {
    /// Wrap a failure coming from a presentation backend (clipboard, dialog, terminal).
    pub fn presentation(err: impl std::fmt::Display) -> Self {
        Self::Presentation(err.to_string())
    }
}

/// Settings-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Could not determine {0} directory")]
    NoDirectory(&'static str),

    #[error("Failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}
