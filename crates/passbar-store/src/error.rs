//! Error types for store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or decrypting the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Failed to run {binary}: {source}")]
    ToolLaunch {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Setup abandoned: {0}")]
    SetupAbandoned(String),

    #[error(transparent)]
    Core(#[from] passbar_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<passbar_core::error::ConfigError> for StoreError {
    fn from(e: passbar_core::error::ConfigError) -> Self {
        Self::Core(e.into())
    }
}

/// Convenience result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
