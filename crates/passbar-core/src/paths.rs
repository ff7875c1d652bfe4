//! Path resolution utilities.

use crate::env;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Application directory name under the per-user config directory.
pub const APP_NAME: &str = "passbar";

/// Get the passbar base directory (`<config dir>/passbar`).
///
/// On macOS this is `~/Library/Application Support/passbar`, on Linux
/// `$XDG_CONFIG_HOME/passbar` or `~/.config/passbar`.
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let config = dirs::config_dir().ok_or(ConfigError::NoDirectory("config"))?;
    Ok(config.join(APP_NAME))
}

/// Get the settings file path (`<base dir>/config.json`).
pub fn settings_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("config.json"))
}

/// Get the menu session history file path (`<base dir>/history`).
pub fn history_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("history"))
}

/// Default password store root: `$PASSWORD_STORE_DIR` or `~/.password-store`.
pub fn default_store_dir() -> PathBuf {
    env::get_var(env::vars::PASSWORD_STORE_DIR)
        .map(|v| expand_tilde(&v))
        .unwrap_or_else(|| expand_tilde("~/.password-store"))
}

/// Default GnuPG home: `$GNUPGHOME` or `~/.gnupg`.
pub fn default_gpg_home() -> PathBuf {
    env::get_var(env::vars::GNUPGHOME)
        .map(|v| expand_tilde(&v))
        .unwrap_or_else(|| expand_tilde("~/.gnupg"))
}

/// Expand tilde (~) in a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// True if `path` names an existing regular file.
pub fn is_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    !path.as_os_str().is_empty() && path.is_file()
}

/// True if `path` names an existing directory.
pub fn is_dir(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    !path.as_os_str().is_empty() && path.is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_file_location() {
        if let Ok(file) = settings_file() {
            assert!(file.ends_with("passbar/config.json"));
        }
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/test");
        assert!(!expanded.to_string_lossy().contains('~'));
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }

    #[test]
    fn test_empty_path_is_neither_file_nor_dir() {
        assert!(!is_file(""));
        assert!(!is_dir(""));
    }

    #[test]
    fn test_is_file_and_is_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("f.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(is_dir(tmp.path()));
        assert!(!is_file(tmp.path()));
        assert!(is_file(&file));
        assert!(!is_dir(&file));
    }
}
