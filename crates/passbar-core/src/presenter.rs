//! The interface between the retrieval workflow and whatever draws the UI.
//!
//! Every call is modal: it blocks until the user answers. Implementations
//! live in the CLI crate (terminal) and in tests (scripted).

use crate::error::Result;
use crate::secret::SecretString;
use std::path::{Path, PathBuf};

/// What the user chose in the passphrase dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Cancel,
    Copy,
    Show,
}

/// Answer to a passphrase prompt.
#[derive(Debug, Clone)]
pub struct PassphraseResponse {
    pub action: UserAction,
    pub passphrase: SecretString,
}

impl PassphraseResponse {
    pub fn cancel() -> Self {
        Self {
            action: UserAction::Cancel,
            passphrase: SecretString::default(),
        }
    }

    pub fn copy(passphrase: impl Into<SecretString>) -> Self {
        Self {
            action: UserAction::Copy,
            passphrase: passphrase.into(),
        }
    }

    pub fn show(passphrase: impl Into<SecretString>) -> Self {
        Self {
            action: UserAction::Show,
            passphrase: passphrase.into(),
        }
    }
}

/// Kind of filesystem object a path prompt expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Dir,
    File,
}

impl PathKind {
    /// Whether `path` exists as this kind of object.
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Self::Dir => crate::paths::is_dir(path),
            Self::File => crate::paths::is_file(path),
        }
    }

    /// Prefix used when re-prompting after an invalid answer.
    pub fn missing_message(&self) -> &'static str {
        match self {
            Self::Dir => "Directory does not exist.",
            Self::File => "File does not exist.",
        }
    }
}

/// A request for a filesystem path.
#[derive(Debug, Clone)]
pub struct PathPrompt {
    pub message: String,
    pub title: String,
    pub default_text: String,
    pub kind: PathKind,
}

impl PathPrompt {
    pub fn new(
        message: impl Into<String>,
        title: impl Into<String>,
        default_text: impl Into<String>,
        kind: PathKind,
    ) -> Self {
        Self {
            message: message.into(),
            title: title.into(),
            default_text: default_text.into(),
            kind,
        }
    }

    /// Message shown after the user entered a path that does not exist.
    pub fn retry_message(&self) -> String {
        format!("{}\n{}", self.kind.missing_message(), self.message)
    }

    /// Prompt for the gpg binary.
    pub fn gpg_binary(default_text: impl Into<String>) -> Self {
        Self::new(
            "Please enter path to the gpg binary.\n\nYou can open a terminal and use \
             `which gpg` to determine this.",
            "Enter GPG Binary Path",
            default_text,
            PathKind::File,
        )
    }

    /// Prompt for the GnuPG home directory.
    pub fn gpg_home(default_text: impl Into<String>) -> Self {
        Self::new(
            "Please enter the path to your GPG Home directory.\n\nWe try to use a sensible \
             default here, but you can check yours by typing `gpg --version` from the \
             command line and checking the `Home:` value.",
            "Set GPG Home Directory",
            default_text,
            PathKind::Dir,
        )
    }

    /// Prompt for the password store root.
    pub fn store_dir(default_text: impl Into<String>) -> Self {
        Self::new(
            "Please enter the path to your pass directory",
            "Set Password Store Directory",
            default_text,
            PathKind::Dir,
        )
    }
}

/// Modal user-facing operations the workflow relies on.
pub trait Presenter {
    /// Ask for a path. Re-prompts until the path exists as `prompt.kind`;
    /// `None` when the user gives up.
    fn prompt_path(&mut self, prompt: &PathPrompt) -> Result<Option<PathBuf>>;

    /// Ask for a passphrase for `entry_label`, showing `attempt` of `max_attempts`.
    fn prompt_passphrase(
        &mut self,
        entry_label: &str,
        attempt: u32,
        max_attempts: u32,
    ) -> Result<PassphraseResponse>;

    /// Display decrypted contents.
    fn show_plaintext(&mut self, title: &str, text: &str) -> Result<()>;

    /// Display an informational message with an OK button.
    fn show_message(&mut self, text: &str, title: &str) -> Result<()>;

    /// Emit a desktop notification.
    fn notify(&mut self, title: &str, subtitle: &str, message: &str) -> Result<()>;

    /// Put `text` on the system clipboard.
    fn copy_to_clipboard(&mut self, text: &str) -> Result<()>;
}
