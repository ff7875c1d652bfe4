//! CLI binary integration tests.
//!
//! These tests run the compiled `passbar` binary to verify command routing,
//! help text, and the non-interactive commands against a temporary store.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn passbar_cmd(config: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_passbar"));
    cmd.env("PASSBAR_CONFIG", config).env_remove("RUST_LOG");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A settings file pointing at a small store: `a.gpg`, `Sub/b.gpg`, `.hidden/c.gpg`.
fn fixture() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let store = tmp.path().join("store");
    for rel in ["a.gpg", "Sub/b.gpg", ".hidden/c.gpg"] {
        let path = store.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "ciphertext").unwrap();
    }
    let config = tmp.path().join("config.json");
    std::fs::write(
        &config,
        serde_json::json!({ "store_home": store.display().to_string() }).to_string(),
    )
    .unwrap();
    (tmp, config)
}

#[test]
fn test_cli_version() {
    let (_tmp, config) = fixture();
    let output = passbar_cmd(&config).arg("version").output().unwrap();
    assert!(output.status.success(), "version command should succeed");
    assert!(stdout(&output).contains("passbar"));
}

#[test]
fn test_cli_help() {
    let (_tmp, config) = fixture();
    let output = passbar_cmd(&config).arg("--help").output().unwrap();
    assert!(output.status.success(), "--help should succeed");
    let text = stdout(&output);
    for command in ["menu", "list", "copy", "show", "config", "doctor"] {
        assert!(text.contains(command), "help should mention '{command}', got: {text}");
    }
}

#[test]
fn test_cli_unknown_command() {
    let (_tmp, config) = fixture();
    let output = passbar_cmd(&config).arg("nonexistent-command").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_cli_list_tree() {
    let (_tmp, config) = fixture();
    let output = passbar_cmd(&config).arg("list").output().unwrap();
    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(String::from).collect();
    assert_eq!(lines, vec!["a", "Sub/", "  b"]);
}

#[test]
fn test_cli_list_flat() {
    let (_tmp, config) = fixture();
    let output = passbar_cmd(&config).args(["list", "--flat"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().collect::<Vec<_>>(), vec!["a", "Sub/b"]);
}

#[test]
fn test_cli_config_set_then_get() {
    let (_tmp, config) = fixture();
    let set = passbar_cmd(&config)
        .args(["config", "set", "max_recent_items", "4"])
        .output()
        .unwrap();
    assert!(set.status.success());

    let get = passbar_cmd(&config)
        .args(["config", "get", "max_recent_items"])
        .output()
        .unwrap();
    assert_eq!(stdout(&get).trim(), "4");

    // Existing keys survive the commit
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert!(raw.get("store_home").is_some());
}

#[test]
fn test_cli_config_unknown_key_fails() {
    let (_tmp, config) = fixture();
    let output = passbar_cmd(&config)
        .args(["config", "get", "gateway.port"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_cli_copy_unknown_entry_fails() {
    let (_tmp, config) = fixture();
    let output = passbar_cmd(&config).args(["copy", "nope"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope"));
}
