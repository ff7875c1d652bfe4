//! Settings file schema, keys, and defaults.

use crate::error::ConfigError;
use crate::recents::DEFAULT_CAPACITY;
use crate::{env, paths};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

/// On-disk settings. Only keys the user has explicitly set are present;
/// everything else falls back to [`Defaults`] at read time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_home: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpg_binary_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpg_home: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_recent_items: Option<usize>,

    /// Keys this version does not know about, kept so a commit does not drop them.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SettingsFile {
    /// Build from a parsed JSON object, taking each known key on its own.
    ///
    /// A known key with a value of the wrong type is left in `extra`, so it
    /// defaults in memory but is written back untouched on commit.
    pub fn from_map(mut map: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut take_string = |key: SettingKey| match map.get(key.as_str()) {
            Some(serde_json::Value::String(s)) => {
                let s = s.clone();
                map.remove(key.as_str());
                Some(s)
            }
            Some(other) => {
                warn!(key = %key, value = %other, "ignoring setting with wrong type");
                None
            }
            None => None,
        };
        let store_home = take_string(SettingKey::StoreHome);
        let gpg_binary_path = take_string(SettingKey::GpgBinaryPath);
        let gpg_home = take_string(SettingKey::GpgHome);

        let key = SettingKey::MaxRecentItems;
        let max_recent_items = match map.get(key.as_str()).map(as_count) {
            Some(Some(count)) => {
                map.remove(key.as_str());
                Some(count)
            }
            Some(None) => {
                warn!(key = %key, "ignoring setting with wrong type");
                None
            }
            None => None,
        };

        Self {
            store_home,
            gpg_binary_path,
            gpg_home,
            max_recent_items,
            extra: map,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.store_home.is_none()
            && self.gpg_binary_path.is_none()
            && self.gpg_home.is_none()
            && self.max_recent_items.is_none()
            && self.extra.is_empty()
    }
}

// json5 may hand back whole numbers as floats.
fn as_count(value: &serde_json::Value) -> Option<usize> {
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).ok();
    }
    value
        .as_f64()
        .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= usize::MAX as f64)
        .map(|f| f as usize)
}

/// The four well-known settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    StoreHome,
    GpgBinaryPath,
    GpgHome,
    MaxRecentItems,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::StoreHome,
        SettingKey::GpgBinaryPath,
        SettingKey::GpgHome,
        SettingKey::MaxRecentItems,
    ];

    /// Key as written in the settings file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StoreHome => "store_home",
            Self::GpgBinaryPath => "gpg_binary_path",
            Self::GpgHome => "gpg_home",
            Self::MaxRecentItems => "max_recent_items",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

/// Fallback values for keys missing from the settings file.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub store_home: PathBuf,
    /// Empty when `gpg` is not on the `PATH`.
    pub gpg_binary_path: PathBuf,
    pub gpg_home: PathBuf,
    pub max_recent_items: usize,
}

impl Defaults {
    /// Resolve defaults from the environment: `PATH` lookup for `gpg`,
    /// `$GNUPGHOME` / `~/.gnupg`, `$PASSWORD_STORE_DIR` / `~/.password-store`.
    pub fn from_env() -> Self {
        Self {
            store_home: paths::default_store_dir(),
            gpg_binary_path: env::find_executable("gpg").unwrap_or_default(),
            gpg_home: paths::default_gpg_home(),
            max_recent_items: DEFAULT_CAPACITY,
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::from_env()
    }
}
