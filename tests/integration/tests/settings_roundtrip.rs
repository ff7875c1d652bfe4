//! Settings commit/load roundtrip integration tests.
//!
//! Settings are written only when committed, and only the keys that were
//! explicitly set reach the file.

use passbar_core::config::{Defaults, SettingKey, Settings};
use std::path::PathBuf;
use tempfile::TempDir;

fn defaults() -> Defaults {
    Defaults {
        store_home: PathBuf::from("/default/store"),
        gpg_binary_path: PathBuf::from("/usr/bin/gpg"),
        gpg_home: PathBuf::from("/default/gnupg"),
        max_recent_items: 10,
    }
}

#[test]
fn test_commit_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut settings = Settings::load_with_defaults(&path, defaults());
    settings.set_gpg_home("/custom/gnupg");
    settings.set_max_recent_items(3);
    settings.commit().unwrap();

    let loaded = Settings::load_with_defaults(&path, defaults());
    assert_eq!(loaded.gpg_home(), PathBuf::from("/custom/gnupg"));
    assert_eq!(loaded.max_recent_items(), 3);
    // Untouched keys still come from defaults
    assert_eq!(loaded.store_home(), PathBuf::from("/default/store"));
    assert_eq!(loaded.gpg_binary_path(), PathBuf::from("/usr/bin/gpg"));
}

#[test]
fn test_only_set_keys_are_written() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut settings = Settings::load_with_defaults(&path, defaults());
    settings.set(SettingKey::StoreHome, "/my/store").unwrap();
    settings.commit().unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let object = raw.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(object["store_home"], "/my/store");
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ store_home: ").unwrap();

    let settings = Settings::load_with_defaults(&path, defaults());
    assert_eq!(settings.store_home(), PathBuf::from("/default/store"));
    assert_eq!(settings.max_recent_items(), 10);
}

#[test]
fn test_hand_edited_json5_is_accepted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        "{\n  // edited by hand\n  gpg_home: '/hand/gnupg',\n  max_recent_items: 5,\n}\n",
    )
    .unwrap();

    let settings = Settings::load_with_defaults(&path, defaults());
    assert_eq!(settings.gpg_home(), PathBuf::from("/hand/gnupg"));
    assert_eq!(settings.max_recent_items(), 5);
}
