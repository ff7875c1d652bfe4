//! Interactive menu session.
//!
//! `passbar` with no arguments opens a numbered view of the store and reads
//! commands with rustyline: a number opens that secret, `r<n>` reopens a
//! recent one, and slash commands change settings.

use crate::render;
use crate::terminal::TerminalPresenter;
use passbar_core::config::Settings;
use passbar_core::presenter::{PathPrompt, Presenter};
use passbar_core::recents::RecentsTracker;
use passbar_core::types::StoreEntry;
use passbar_store::catalog;
use passbar_store::setup::configure_crypto_client;
use passbar_store::{GpgClient, Outcome, PassphraseWorkflow};
use rustyline::error::ReadlineError;
use rustyline::hint::HistoryHinter;
use rustyline::{CompletionType, Config, EditMode, Editor};
use rustyline_derive::{Helper, Highlighter, Hinter, Validator};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SLASH_COMMANDS: &[&str] = &[
    "/store",
    "/gpg-binary",
    "/gpg-home",
    "/refresh",
    "/help",
    "/quit",
    "/exit",
];

/// A parsed menu input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    /// Open the n-th secret (1-based).
    Open(usize),
    /// Open the n-th recent (1-based).
    OpenRecent(usize),
    SetStore,
    SetGpgBinary,
    SetGpgHome,
    Refresh,
    Help,
    Quit,
}

impl MenuCommand {
    /// Parse one line of input. `None` for anything unrecognised.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line {
            "/store" => return Some(Self::SetStore),
            "/gpg-binary" => return Some(Self::SetGpgBinary),
            "/gpg-home" => return Some(Self::SetGpgHome),
            "/refresh" => return Some(Self::Refresh),
            "/help" | "?" => return Some(Self::Help),
            "/quit" | "/exit" => return Some(Self::Quit),
            _ => {}
        }
        if let Some(rest) = line.strip_prefix('r') {
            return rest.parse::<usize>().ok().filter(|n| *n > 0).map(Self::OpenRecent);
        }
        line.parse::<usize>().ok().filter(|n| *n > 0).map(Self::Open)
    }
}

/// The answer to a path prompt, or `None` when it keeps the current value.
fn changed_path(answer: Option<PathBuf>, current: &Path) -> Option<PathBuf> {
    answer.filter(|path| path != current)
}

/// Menu configuration.
pub struct MenuConfig {
    /// Path to history file.
    pub history_file: PathBuf,
}

impl Default for MenuConfig {
    fn default() -> Self {
        let history_file = passbar_core::paths::history_file()
            .unwrap_or_else(|_| PathBuf::from(".passbar_history"));
        Self { history_file }
    }
}

/// Tab-completion helper for slash commands.
#[derive(Helper, Highlighter, Hinter, Validator)]
struct MenuHelper {
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
}

impl rustyline::completion::Completer for MenuHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if !line.starts_with('/') {
            return Ok((pos, Vec::new()));
        }
        let prefix = &line[..pos];
        let matches = SLASH_COMMANDS
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(|c| c.to_string())
            .collect();
        Ok((0, matches))
    }
}

/// The interactive menu.
pub struct Menu {
    settings: Settings,
    presenter: TerminalPresenter,
    catalog: Vec<StoreEntry>,
    recents: RecentsTracker,
    /// Built the first time an entry is opened.
    client: Option<GpgClient>,
    config: MenuConfig,
}

impl Menu {
    pub fn new(settings: Settings) -> Self {
        let recents = RecentsTracker::new(settings.max_recent_items());
        let catalog = catalog::build(&settings.store_home());
        Self {
            settings,
            presenter: TerminalPresenter::new(),
            catalog,
            recents,
            client: None,
            config: MenuConfig::default(),
        }
    }

    /// Run the menu loop.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        render::render_welcome(&self.settings.store_home());
        self.render_menu();

        let rl_config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .build();

        let mut rl: Editor<MenuHelper, rustyline::history::FileHistory> =
            Editor::with_config(rl_config)?;
        rl.set_helper(Some(MenuHelper {
            hinter: HistoryHinter::new(),
        }));

        // History only ever holds menu commands, never passphrases.
        let _ = rl.load_history(&self.config.history_file);

        loop {
            let prompt = console::style("passbar> ").green().bold().to_string();
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(trimmed);

                    let Some(command) = MenuCommand::parse(trimmed) else {
                        eprintln!("{}: {}", console::style("Unknown command").red(), trimmed);
                        render::render_help();
                        continue;
                    };
                    if command == MenuCommand::Quit {
                        break;
                    }
                    self.handle(command).await?;
                }
                Err(ReadlineError::Interrupted) => {
                    eprintln!("{}", console::style("^C (type /quit to exit)").dim());
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("{}: {}", console::style("Error").red(), err);
                    break;
                }
            }
        }

        if let Some(parent) = self.config.history_file.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(&self.config.history_file);
        Ok(())
    }

    /// Handle one command. Only fatal errors are returned.
    async fn handle(&mut self, command: MenuCommand) -> anyhow::Result<()> {
        match command {
            MenuCommand::Open(n) => {
                let entry = catalog::secrets(&self.catalog)
                    .get(n - 1)
                    .map(|e| (*e).clone());
                match entry {
                    Some(entry) => self.open(&entry).await?,
                    None => eprintln!("{}", console::style(format!("No secret {n}")).red()),
                }
            }
            MenuCommand::OpenRecent(n) => match self.recents.get(n - 1).map(|r| r.to_entry()) {
                Some(entry) => self.open(&entry).await?,
                None => eprintln!("{}", console::style(format!("No recent r{n}")).red()),
            },
            MenuCommand::SetStore => self.set_store()?,
            MenuCommand::SetGpgBinary => self.set_gpg_binary()?,
            MenuCommand::SetGpgHome => self.set_gpg_home()?,
            MenuCommand::Refresh => {
                self.settings.reload();
                self.recents.set_capacity(self.settings.max_recent_items());
                self.rebuild();
                self.render_menu();
            }
            MenuCommand::Help => render::render_help(),
            MenuCommand::Quit => {}
        }
        Ok(())
    }

    /// Run the passphrase workflow for `entry`, configuring gpg first if needed.
    async fn open(&mut self, entry: &StoreEntry) -> anyhow::Result<()> {
        if self.client.is_none() {
            // Abandoning setup ends the session.
            let client = configure_crypto_client(&mut self.settings, &mut self.presenter)?;
            self.client = Some(client);
        }
        let Some(client) = self.client.as_ref() else {
            return Ok(());
        };

        let result = PassphraseWorkflow::new(client, &mut self.presenter, &mut self.recents)
            .resolve(entry)
            .await;
        match result {
            Ok(Outcome::Copied) => render::render_recents(&self.recents),
            Ok(outcome) => debug!(?outcome, "workflow finished"),
            Err(e) => eprintln!("{}: {}", console::style("Error").red(), e),
        }
        Ok(())
    }

    fn set_store(&mut self) -> anyhow::Result<()> {
        let current = self.settings.store_home();
        let prompt = PathPrompt::store_dir(current.display().to_string());
        let answer = self.presenter.prompt_path(&prompt)?;
        if let Some(path) = changed_path(answer, &current) {
            self.settings.set_store_home(&path);
            self.settings.commit()?;
            self.recents.reset();
            self.rebuild();
            info!(store = %path.display(), "switched password store");
            self.render_menu();
        }
        Ok(())
    }

    fn set_gpg_binary(&mut self) -> anyhow::Result<()> {
        let current = self.settings.gpg_binary_path();
        let prompt = PathPrompt::gpg_binary(current.display().to_string());
        let answer = self.presenter.prompt_path(&prompt)?;
        if let Some(path) = changed_path(answer, &current) {
            self.settings.set_gpg_binary_path(&path);
            self.settings.commit()?;
            if let Some(client) = self.client.as_mut() {
                client.set_binary_path(path);
            }
        }
        Ok(())
    }

    fn set_gpg_home(&mut self) -> anyhow::Result<()> {
        let current = self.settings.gpg_home();
        let prompt = PathPrompt::gpg_home(current.display().to_string());
        let answer = self.presenter.prompt_path(&prompt)?;
        if let Some(path) = changed_path(answer, &current) {
            self.settings.set_gpg_home(&path);
            self.settings.commit()?;
            if let Some(client) = self.client.as_mut() {
                client.set_home(path);
            }
        }
        Ok(())
    }

    fn rebuild(&mut self) {
        self.catalog = catalog::build(&self.settings.store_home());
    }

    fn render_menu(&self) {
        render::render_catalog(&self.catalog);
        println!();
        render::render_recents(&self.recents);
        println!();
    }
}
