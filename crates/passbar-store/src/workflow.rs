//! Passphrase workflow.
//!
//! Opening an entry is a small state machine:
//!
//! ```text
//! Prompting(1) --wrong--> Prompting(2) --wrong--> Prompting(3) --wrong--> Exhausted
//!      |                       |                       |
//!      +--cancel--> Cancelled  +--ok--> Success --> Copied | Revealed
//! ```
//!
//! Exhausting all attempts ends silently; the user simply stops being asked.

use passbar_core::presenter::{Presenter, UserAction};
use passbar_core::recents::RecentsTracker;
use passbar_core::types::{DecryptedSecret, StoreEntry};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::gpg::Decrypt;

/// Passphrase attempts allowed per entry.
pub const MAX_ATTEMPTS: u32 = 3;

/// How a workflow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// First token placed on the clipboard.
    Copied,
    /// Full plaintext shown to the user.
    Revealed,
    /// User pressed cancel.
    Cancelled,
    /// Every attempt failed.
    Exhausted,
}

/// One round of asking for a passphrase.
#[derive(Debug, Clone, Copy)]
pub struct PassphraseAttempt<'e> {
    pub entry: &'e StoreEntry,
    pub attempt_number: u32,
    pub max_attempts: u32,
}

impl<'e> PassphraseAttempt<'e> {
    fn first(entry: &'e StoreEntry, max_attempts: u32) -> Self {
        Self {
            entry,
            attempt_number: 1,
            max_attempts,
        }
    }

    /// The following attempt, or `None` if this was the last one.
    fn next(self) -> Option<Self> {
        (self.attempt_number < self.max_attempts).then(|| Self {
            attempt_number: self.attempt_number + 1,
            ..self
        })
    }
}

enum State<'e> {
    Prompting(PassphraseAttempt<'e>),
    Success(UserAction, DecryptedSecret),
    Cancelled,
    Exhausted,
}

/// Drives one entry from selection to copy, reveal, cancel, or exhaustion.
pub struct PassphraseWorkflow<'a, D: ?Sized, P: ?Sized> {
    decryptor: &'a D,
    presenter: &'a mut P,
    recents: &'a mut RecentsTracker,
    max_attempts: u32,
}

impl<'a, D, P> PassphraseWorkflow<'a, D, P>
where
    D: Decrypt + ?Sized,
    P: Presenter + ?Sized,
{
    pub fn new(decryptor: &'a D, presenter: &'a mut P, recents: &'a mut RecentsTracker) -> Self {
        Self {
            decryptor,
            presenter,
            recents,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Override the attempt bound (at least one).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Run the workflow for `entry` until it reaches a terminal state.
    ///
    /// Errors are reserved for presentation failures such as an unavailable
    /// clipboard; wrong passphrases are handled internally.
    pub async fn resolve(&mut self, entry: &StoreEntry) -> Result<Outcome> {
        let mut state = State::Prompting(PassphraseAttempt::first(entry, self.max_attempts));
        loop {
            state = match state {
                State::Prompting(attempt) => self.prompt(attempt).await?,
                State::Success(action, plaintext) => {
                    return self.deliver(entry, action, &plaintext);
                }
                State::Cancelled => {
                    debug!(entry = %entry.location.display(), "passphrase prompt cancelled");
                    return Ok(Outcome::Cancelled);
                }
                State::Exhausted => {
                    info!(
                        entry = %entry.location.display(),
                        attempts = self.max_attempts,
                        "giving up after failed attempts"
                    );
                    return Ok(Outcome::Exhausted);
                }
            };
        }
    }

    async fn prompt<'e>(&mut self, attempt: PassphraseAttempt<'e>) -> Result<State<'e>> {
        let response = self.presenter.prompt_passphrase(
            &attempt.entry.name,
            attempt.attempt_number,
            attempt.max_attempts,
        )?;

        if response.action == UserAction::Cancel {
            return Ok(State::Cancelled);
        }

        match self
            .decryptor
            .decrypt(&attempt.entry.location, response.passphrase.non_empty())
            .await
        {
            Ok(plaintext) => Ok(State::Success(response.action, plaintext)),
            Err(e) => {
                warn!(
                    entry = %attempt.entry.location.display(),
                    attempt = attempt.attempt_number,
                    "invalid passphrase"
                );
                debug!("decrypt failed: {e}");
                Ok(attempt
                    .next()
                    .map(State::Prompting)
                    .unwrap_or(State::Exhausted))
            }
        }
    }

    fn deliver(
        &mut self,
        entry: &StoreEntry,
        action: UserAction,
        plaintext: &DecryptedSecret,
    ) -> Result<Outcome> {
        match action {
            UserAction::Show => {
                self.presenter.show_plaintext(&entry.name, plaintext.expose())?;
                Ok(Outcome::Revealed)
            }
            UserAction::Copy => {
                self.presenter.copy_to_clipboard(plaintext.first_token())?;
                self.recents.add_recent(entry);
                let message = format!("Copied {} to Clipboard", entry.file_name());
                if let Err(e) = self.presenter.notify("Password Copied", &entry.name, &message) {
                    warn!("could not show notification: {e}");
                }
                info!(entry = %entry.location.display(), "copied password");
                Ok(Outcome::Copied)
            }
            UserAction::Cancel => Ok(Outcome::Cancelled),
        }
    }
}
