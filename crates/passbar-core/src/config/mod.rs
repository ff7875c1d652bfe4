//! Settings loading and management.
//!
//! [`Settings`] is an explicit object handed by `&mut` to whatever needs to
//! read or change configuration. Setters only update memory and mark the
//! settings dirty; nothing reaches disk until [`Settings::commit`] is called.

mod loader;
mod schema;

pub use schema::*;

use crate::error::ConfigError;
use crate::paths::expand_tilde;
use std::path::{Path, PathBuf};
use tracing::info;

/// Loaded settings plus the file they commit to.
#[derive(Debug, Clone)]
pub struct Settings {
    path: PathBuf,
    values: SettingsFile,
    defaults: Defaults,
    dirty: bool,
    /// The file on disk could not be parsed and is backed up before the
    /// first commit replaces it.
    unparsed: bool,
}

impl Settings {
    /// In-memory settings bound to `path`, nothing set yet.
    pub fn new(path: impl Into<PathBuf>, defaults: Defaults) -> Self {
        Self {
            path: path.into(),
            values: SettingsFile::default(),
            defaults,
            dirty: false,
            unparsed: false,
        }
    }

    /// File this object commits to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Explicitly set values, without defaults applied.
    pub fn explicit(&self) -> &SettingsFile {
        &self.values
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// True when there are changes not yet committed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn store_home(&self) -> PathBuf {
        self.values
            .store_home
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| self.defaults.store_home.clone())
    }

    pub fn gpg_binary_path(&self) -> PathBuf {
        self.values
            .gpg_binary_path
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| self.defaults.gpg_binary_path.clone())
    }

    pub fn gpg_home(&self) -> PathBuf {
        self.values
            .gpg_home
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| self.defaults.gpg_home.clone())
    }

    pub fn max_recent_items(&self) -> usize {
        self.values
            .max_recent_items
            .unwrap_or(self.defaults.max_recent_items)
    }

    pub fn set_store_home(&mut self, path: impl AsRef<Path>) {
        let value = path.as_ref().display().to_string();
        self.record(SettingKey::StoreHome, &value);
        self.values.store_home = Some(value);
    }

    pub fn set_gpg_binary_path(&mut self, path: impl AsRef<Path>) {
        let value = path.as_ref().display().to_string();
        self.record(SettingKey::GpgBinaryPath, &value);
        self.values.gpg_binary_path = Some(value);
    }

    pub fn set_gpg_home(&mut self, path: impl AsRef<Path>) {
        let value = path.as_ref().display().to_string();
        self.record(SettingKey::GpgHome, &value);
        self.values.gpg_home = Some(value);
    }

    pub fn set_max_recent_items(&mut self, count: usize) {
        self.record(SettingKey::MaxRecentItems, &count.to_string());
        self.values.max_recent_items = Some(count);
    }

    /// Effective value of `key` as a string.
    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::StoreHome => self.store_home().display().to_string(),
            SettingKey::GpgBinaryPath => self.gpg_binary_path().display().to_string(),
            SettingKey::GpgHome => self.gpg_home().display().to_string(),
            SettingKey::MaxRecentItems => self.max_recent_items().to_string(),
        }
    }

    /// Set `key` from its string form. Does not commit.
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<(), ConfigError> {
        match key {
            SettingKey::StoreHome => self.set_store_home(value),
            SettingKey::GpgBinaryPath => self.set_gpg_binary_path(value),
            SettingKey::GpgHome => self.set_gpg_home(value),
            SettingKey::MaxRecentItems => {
                let count = value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        key: key.to_string(),
                        reason: format!("expected a positive integer, got '{value}'"),
                    })?;
                self.set_max_recent_items(count);
            }
        }
        Ok(())
    }

    fn record(&mut self, key: SettingKey, value: &str) {
        info!(key = %key, value, "updated setting");
        self.values.extra.remove(key.as_str());
        self.dirty = true;
    }
}
