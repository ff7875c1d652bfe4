//! # passbar-core
//!
//! Core types, settings, and utilities for passbar.
//!
//! This crate provides the pieces shared by the store and CLI crates:
//!
//! - **Settings**: Tolerant loading and explicit committing of the settings file
//! - **Types**: Catalog entries, recents records, and decrypted plaintext
//! - **Recents**: The bounded most-recently-used list
//! - **Presenter**: The narrow interface the workflow uses to talk to the user

pub mod config;
pub mod env;
pub mod error;
pub mod paths;
pub mod presenter;
pub mod recents;
pub mod secret;
pub mod types;

// Re-exports for convenience
pub use config::{SettingKey, Settings};
pub use error::{Error, Result};
pub use presenter::{PassphraseResponse, PathKind, PathPrompt, Presenter, UserAction};
pub use recents::RecentsTracker;
pub use secret::SecretString;
pub use types::*;
