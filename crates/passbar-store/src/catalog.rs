//! Password store catalog.
//!
//! Walks the store root into a tree of [`StoreEntry`] values. Directories
//! become groups unless their name starts with a dot; files become secrets
//! only if they carry the `.gpg` extension. Each level lists secrets before
//! groups, each alphabetically by path, so the tree does not depend on the
//! order the filesystem returns entries in.

use passbar_core::types::StoreEntry;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extension of encrypted secret files.
pub const SECRET_EXTENSION: &str = "gpg";

/// Build the full catalog under `root`.
///
/// A missing or unreadable root yields an empty catalog.
pub fn build(root: &Path) -> Vec<StoreEntry> {
    let mut ancestors = HashSet::new();
    let entries = build_level(root, &mut ancestors);
    debug!(root = %root.display(), secrets = secrets(&entries).len(), "built catalog");
    entries
}

fn build_level(dir: &Path, ancestors: &mut HashSet<PathBuf>) -> Vec<StoreEntry> {
    // Symlinked directories may point back up the tree.
    let canonical = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    if !ancestors.insert(canonical.clone()) {
        warn!(path = %dir.display(), "skipping directory cycle");
        return Vec::new();
    }

    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            warn!(path = %dir.display(), "could not read store directory: {e}");
            ancestors.remove(&canonical);
            return Vec::new();
        }
    };

    let mut kept: Vec<(bool, PathBuf)> = read_dir
        .flatten()
        .map(|entry| entry.path())
        .filter_map(|path| classify(&path).map(|is_group| (is_group, path)))
        .collect();
    kept.sort();

    let entries = kept
        .into_iter()
        .map(|(is_group, path)| {
            if is_group {
                let children = build_level(&path, ancestors);
                StoreEntry::group(display_name(&path, false), path, children)
            } else {
                StoreEntry::secret(display_name(&path, true), path)
            }
        })
        .collect();

    ancestors.remove(&canonical);
    entries
}

/// `Some(true)` for a group, `Some(false)` for a secret, `None` to skip.
fn classify(path: &Path) -> Option<bool> {
    let name = path.file_name()?.to_string_lossy();
    if path.is_dir() {
        return (!name.starts_with('.')).then_some(true);
    }
    let is_secret = path.is_file()
        && path.extension().and_then(|e| e.to_str()) == Some(SECRET_EXTENSION);
    is_secret.then_some(false)
}

fn display_name(path: &Path, strip_extension: bool) -> String {
    let name = if strip_extension {
        path.file_stem()
    } else {
        path.file_name()
    };
    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// All secrets in display order, depth first.
pub fn secrets(entries: &[StoreEntry]) -> Vec<&StoreEntry> {
    let mut out = Vec::new();
    collect_secrets(entries, &mut out);
    out
}

fn collect_secrets<'a>(entries: &'a [StoreEntry], out: &mut Vec<&'a StoreEntry>) {
    for entry in entries {
        if entry.is_group() {
            collect_secrets(entry.children(), out);
        } else {
            out.push(entry);
        }
    }
}

/// Resolve a secret by its store-relative name, e.g. `Email/work`.
///
/// A trailing `.gpg` is accepted.
pub fn find<'a>(entries: &'a [StoreEntry], name: &str) -> Option<&'a StoreEntry> {
    let name = name.trim_matches('/');
    let name = name
        .strip_suffix(&format!(".{SECRET_EXTENSION}"))
        .unwrap_or(name);

    let mut parts = name.split('/').filter(|p| !p.is_empty()).peekable();
    let mut level = entries;
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            return level.iter().find(|e| e.is_secret() && e.name == part);
        }
        level = level
            .iter()
            .find(|e| e.is_group() && e.name == part)?
            .children();
    }
    None
}

/// Store-relative name of an entry, slash separated, without extension.
pub fn relative_name(root: &Path, entry: &StoreEntry) -> String {
    let relative = entry
        .location
        .strip_prefix(root)
        .unwrap_or(&entry.location);
    let mut parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if let Some(last) = parts.last_mut() {
        *last = entry.name.clone();
    }
    parts.join("/")
}
