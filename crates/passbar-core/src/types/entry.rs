//! Catalog and recents entries.

use std::fmt;
use std::path::{Path, PathBuf};

/// A node in the password store tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    /// Display label: file stem for secrets, directory name for groups.
    pub name: String,
    /// Path on disk.
    pub location: PathBuf,
    /// Leaf secret or directory group.
    pub kind: EntryKind,
}

/// Whether an entry is an encrypted file or a directory of further entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A single encrypted file.
    Secret,
    /// A directory, children already sorted.
    Group(Vec<StoreEntry>),
}

impl StoreEntry {
    /// Create a secret leaf.
    pub fn secret(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            kind: EntryKind::Secret,
        }
    }

    /// Create a group with the given (sorted) children.
    pub fn group(
        name: impl Into<String>,
        location: impl Into<PathBuf>,
        children: Vec<StoreEntry>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            kind: EntryKind::Group(children),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, EntryKind::Group(_))
    }

    pub fn is_secret(&self) -> bool {
        matches!(self.kind, EntryKind::Secret)
    }

    /// Children of a group; empty for secrets.
    pub fn children(&self) -> &[StoreEntry] {
        match &self.kind {
            EntryKind::Group(children) => children,
            EntryKind::Secret => &[],
        }
    }

    /// File name including extension, e.g. `github.gpg`.
    pub fn file_name(&self) -> String {
        self.location
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }
}

impl fmt::Display for StoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A previously copied secret, as remembered by the recents list.
///
/// Holds only the title and the file location, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentEntry {
    pub title: String,
    pub location: PathBuf,
}

impl RecentEntry {
    pub fn new(title: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Rebuild a secret entry so the recent can be opened again.
    pub fn to_entry(&self) -> StoreEntry {
        StoreEntry::secret(self.title.clone(), self.location.clone())
    }
}

impl From<&StoreEntry> for RecentEntry {
    fn from(entry: &StoreEntry) -> Self {
        Self::new(entry.name.clone(), entry.location.clone())
    }
}
