//! Settings loading and persistence.

use super::{Defaults, Settings, SettingsFile};
use crate::error::ConfigError;
use crate::paths;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

impl Settings {
    /// Load settings from the default path with environment defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::settings_file()?;
        Ok(Self::load(&path))
    }

    /// Load settings from `path` with environment defaults.
    pub fn load(path: &Path) -> Self {
        Self::load_with_defaults(path, Defaults::from_env())
    }

    /// Load settings from `path`.
    ///
    /// A missing, unreadable, or malformed file yields empty settings so the
    /// defaults apply; it is never an error. A known key holding a value of
    /// the wrong type defaults on its own without affecting the others.
    pub fn load_with_defaults(path: &Path, defaults: Defaults) -> Self {
        let mut settings = Self::new(path, defaults);
        settings.read();
        settings
    }

    /// Parse settings file content.
    pub fn parse(content: &str) -> Result<SettingsFile, ConfigError> {
        let map: serde_json::Map<String, serde_json::Value> =
            json5::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(SettingsFile::from_map(map))
    }

    /// Write explicitly set values to disk and clear the dirty flag.
    pub fn commit(&mut self) -> Result<(), ConfigError> {
        if self.unparsed {
            let backup = self.path.with_extension("bak");
            fs::copy(&self.path, &backup).map_err(|source| ConfigError::Write {
                path: backup.clone(),
                source,
            })?;
            warn!(backup = %backup.display(), "kept a copy of the unreadable settings file");
            self.unparsed = false;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        write_atomic(&self.path, &content).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;
        self.dirty = false;
        info!(path = %self.path.display(), "wrote settings");
        Ok(())
    }

    /// Re-read the file, discarding uncommitted changes.
    pub fn reload(&mut self) {
        self.read();
        self.dirty = false;
    }

    fn read(&mut self) {
        let path = &self.path;
        self.unparsed = false;
        self.values = match fs::read_to_string(path) {
            Ok(content) => match Settings::parse(&content) {
                Ok(values) => {
                    info!(path = %path.display(), "loaded custom settings");
                    values
                }
                Err(e) => {
                    warn!(path = %path.display(), "malformed settings, using defaults: {e}");
                    self.unparsed = true;
                    SettingsFile::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no custom settings found");
                SettingsFile::default()
            }
            Err(e) => {
                warn!(path = %path.display(), "could not read settings, using defaults: {e}");
                SettingsFile::default()
            }
        };
    }
}

fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn defaults() -> Defaults {
        Defaults {
            store_home: PathBuf::from("/default/store"),
            gpg_binary_path: PathBuf::new(),
            gpg_home: PathBuf::from("/default/gnupg"),
            max_recent_items: 10,
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_with_defaults(&dir.path().join("config.json"), defaults());
        assert!(settings.explicit().is_empty());
        assert_eq!(settings.gpg_binary_path(), PathBuf::new());
    }

    #[test]
    fn test_commit_then_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut settings = Settings::load_with_defaults(&path, defaults());
        settings.set_store_home("/some/test/new_store_home/");
        settings.commit().unwrap();
        assert!(!settings.is_dirty());

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({ "store_home": "/some/test/new_store_home/" })
        );

        let reloaded = Settings::load_with_defaults(&path, defaults());
        assert_eq!(reloaded.store_home(), PathBuf::from("/some/test/new_store_home/"));
        assert_eq!(reloaded.gpg_home(), PathBuf::from("/default/gnupg"));
    }

    #[test]
    fn test_uncommitted_changes_not_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut settings = Settings::load_with_defaults(&path, defaults());
        settings.set_gpg_home("/g");
        assert!(!path.exists());

        settings.reload();
        assert_eq!(settings.gpg_home(), PathBuf::from("/default/gnupg"));
    }

    #[test]
    fn test_existing_settings_are_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"gpg_binary_path": "/some/gpg/binary/path", "gpg_home": "/some/gpg/home/path/", "store_home": "/some/store/home/path/", "max_recent_items": 3}"#,
        )
        .unwrap();

        let settings = Settings::load_with_defaults(&path, defaults());
        assert_eq!(settings.gpg_binary_path(), PathBuf::from("/some/gpg/binary/path"));
        assert_eq!(settings.gpg_home(), PathBuf::from("/some/gpg/home/path/"));
        assert_eq!(settings.store_home(), PathBuf::from("/some/store/home/path/"));
        assert_eq!(settings.max_recent_items(), 3);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not valid json {").unwrap();

        let settings = Settings::load_with_defaults(&path, defaults());
        assert!(settings.explicit().is_empty());
        assert_eq!(settings.store_home(), PathBuf::from("/default/store"));
    }

    #[test]
    fn test_bad_typed_key_keeps_other_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"store_home": "/my/store", "max_recent_items": "5", "theme": "dark"}"#,
        )
        .unwrap();

        let mut settings = Settings::load_with_defaults(&path, defaults());
        assert_eq!(settings.store_home(), PathBuf::from("/my/store"));
        assert_eq!(settings.max_recent_items(), 10);

        settings.set_gpg_home("/new/home");
        settings.commit().unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({
                "store_home": "/my/store",
                "gpg_home": "/new/home",
                "max_recent_items": "5",
                "theme": "dark",
            })
        );
    }

    #[test]
    fn test_fixing_bad_typed_key_writes_it_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"max_recent_items": "5"}"#).unwrap();

        let mut settings = Settings::load_with_defaults(&path, defaults());
        settings.set_max_recent_items(3);
        settings.commit().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("max_recent_items").count(), 1);
        let reloaded = Settings::load_with_defaults(&path, defaults());
        assert_eq!(reloaded.max_recent_items(), 3);
    }

    #[test]
    fn test_malformed_file_backed_up_before_commit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ store_home: '/my/store', ").unwrap();

        let mut settings = Settings::load_with_defaults(&path, defaults());
        settings.set_gpg_home("/g");
        settings.commit().unwrap();

        let backup = dir.path().join("config.bak");
        assert_eq!(
            fs::read_to_string(&backup).unwrap(),
            "{ store_home: '/my/store', "
        );

        // Only the first commit replaces the unparsed file.
        fs::remove_file(&backup).unwrap();
        settings.set_gpg_home("/h");
        settings.commit().unwrap();
        assert!(!backup.exists());
    }

    #[test]
    fn test_unknown_keys_survive_commit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"new-setting": "new-value"}"#).unwrap();

        let mut settings = Settings::load_with_defaults(&path, defaults());
        settings.set_max_recent_items(5);
        settings.commit().unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["new-setting"], "new-value");
        assert_eq!(raw["max_recent_items"], 5);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            Settings::parse("not valid json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
