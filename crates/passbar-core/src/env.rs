//! Environment variable handling and executable discovery.

use std::env;
use std::path::{Path, PathBuf};

/// Well-known environment variable names.
pub mod vars {
    /// Overrides the settings file location.
    pub const PASSBAR_CONFIG: &str = "PASSBAR_CONFIG";
    /// Conventional `pass` store location override.
    pub const PASSWORD_STORE_DIR: &str = "PASSWORD_STORE_DIR";
    /// GnuPG home directory override.
    pub const GNUPGHOME: &str = "GNUPGHOME";
}

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && (m.permissions().mode() & 0o111 != 0))
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Find `name` on the `PATH`, like `which`.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    let dirs: Vec<PathBuf> = env::split_paths(&path_var).collect();
    find_executable_in_dirs(name, &dirs)
}

/// Find `name` in the given directories, first match wins.
pub fn find_executable_in_dirs(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    if name.trim().is_empty() {
        return None;
    }
    dirs.iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}
