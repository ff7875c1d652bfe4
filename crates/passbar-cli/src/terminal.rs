//! Terminal presentation.
//!
//! Implements [`Presenter`] on top of stdin/stderr prompts, `rpassword` for
//! passphrases, the system clipboard and desktop notifications.

use console::style;
use passbar_core::paths::expand_tilde;
use passbar_core::presenter::{PassphraseResponse, PathPrompt, Presenter, UserAction};
use passbar_core::{Error, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

/// Application name shown on desktop notifications.
const NOTIFICATION_APP: &str = "passbar";

/// Presenter for an interactive terminal.
pub struct TerminalPresenter {
    /// Skip the action question and always do this.
    preset_action: Option<UserAction>,
    /// Kept open for the life of the presenter; on X11 the clipboard owner
    /// must stay alive for the contents to remain available.
    clipboard: Option<arboard::Clipboard>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            preset_action: None,
            clipboard: None,
        }
    }

    /// Presenter that never asks what to do after the passphrase.
    pub fn with_action(action: UserAction) -> Self {
        Self {
            preset_action: Some(action),
            clipboard: None,
        }
    }

    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.clipboard.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| Error::presentation(format!("clipboard unavailable: {e}")))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| Error::presentation("clipboard unavailable"))
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Read one line from stdin. `None` on end of input.
fn read_line(prompt: &str) -> Result<Option<String>> {
    eprint!("{prompt}");
    io::stderr().flush()?;
    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Map an answer to the action question. Empty means copy.
pub fn parse_action(answer: &str) -> Option<UserAction> {
    match answer.trim().to_lowercase().as_str() {
        "" | "c" | "copy" => Some(UserAction::Copy),
        "s" | "show" => Some(UserAction::Show),
        "x" | "q" | "cancel" => Some(UserAction::Cancel),
        _ => None,
    }
}

/// Resolve a typed path answer against the prompt's default.
///
/// Empty input takes the default; with no default it gives up.
pub fn resolve_path_answer(answer: &str, default_text: &str) -> Option<PathBuf> {
    let answer = answer.trim();
    let chosen = if answer.is_empty() { default_text.trim() } else { answer };
    (!chosen.is_empty()).then(|| expand_tilde(chosen))
}

/// How to leave a path prompt, shown above the input line.
pub fn path_hint(default_text: &str) -> String {
    if default_text.is_empty() {
        "Enter nothing or press Ctrl-D to cancel.".to_string()
    } else {
        "Enter keeps the current value, Ctrl-D cancels.".to_string()
    }
}

/// End of input on the passphrase prompt cancels the dialog.
pub fn passphrase_or_cancel(read: io::Result<String>) -> Result<Option<String>> {
    match read {
        Ok(passphrase) => Ok(Some(passphrase)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(Error::presentation(format!("failed to read passphrase: {e}"))),
    }
}

impl Presenter for TerminalPresenter {
    fn prompt_path(&mut self, prompt: &PathPrompt) -> Result<Option<PathBuf>> {
        let mut message = prompt.message.clone();
        loop {
            eprintln!();
            eprintln!("{}", style(&prompt.title).bold());
            eprintln!("{}", message);
            eprintln!("{}", style(path_hint(&prompt.default_text)).dim());
            let hint = if prompt.default_text.is_empty() {
                String::new()
            } else {
                format!(" [{}]", prompt.default_text)
            };
            let Some(answer) = read_line(&format!("{}{} ", style("path").cyan(), hint))? else {
                return Ok(None);
            };
            let Some(path) = resolve_path_answer(&answer, &prompt.default_text) else {
                return Ok(None);
            };
            if prompt.kind.matches(&path) {
                return Ok(Some(path));
            }
            debug!(path = %path.display(), "entered path does not exist");
            message = prompt.retry_message();
        }
    }

    fn prompt_passphrase(
        &mut self,
        entry_label: &str,
        attempt: u32,
        max_attempts: u32,
    ) -> Result<PassphraseResponse> {
        eprintln!(
            "{} {}",
            style(entry_label).bold(),
            style(format!("(attempt {attempt} of {max_attempts})")).dim()
        );
        let read = rpassword::prompt_password("  Passphrase (empty to use the agent, Ctrl-D cancels): ");
        let Some(passphrase) = passphrase_or_cancel(read)? else {
            eprintln!();
            return Ok(PassphraseResponse::cancel());
        };

        let action = match self.preset_action {
            Some(action) => action,
            None => loop {
                let Some(answer) = read_line("  [C]opy, [s]how or cancel [x]: ")? else {
                    break UserAction::Cancel;
                };
                if let Some(action) = parse_action(&answer) {
                    break action;
                }
            },
        };

        Ok(match action {
            UserAction::Cancel => PassphraseResponse::cancel(),
            UserAction::Copy => PassphraseResponse::copy(passphrase),
            UserAction::Show => PassphraseResponse::show(passphrase),
        })
    }

    fn show_plaintext(&mut self, title: &str, text: &str) -> Result<()> {
        eprintln!("{}", style(title).bold().cyan());
        println!("{}", text.trim_end_matches('\n'));
        Ok(())
    }

    fn show_message(&mut self, text: &str, title: &str) -> Result<()> {
        eprintln!("{} {}", style("!").yellow().bold(), style(title).bold());
        eprintln!("  {}", text);
        Ok(())
    }

    fn notify(&mut self, title: &str, subtitle: &str, message: &str) -> Result<()> {
        eprintln!("{} {}", style("*").green(), message);
        notify_rust::Notification::new()
            .summary(title)
            .body(&format!("{subtitle}\n{message}"))
            .appname(NOTIFICATION_APP)
            .show()
            .map(|_| ())
            .map_err(|e| Error::presentation(format!("notification failed: {e}")))
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        self.clipboard()?
            .set_text(text.to_string())
            .map_err(|e| Error::presentation(format!("could not copy to clipboard: {e}")))
    }
}
