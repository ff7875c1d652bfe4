//! passbar command-line interface.

pub mod commands;
pub mod render;
pub mod repl;
pub mod terminal;

use clap::{Parser, Subcommand};
use passbar_core::config::Settings;
use std::path::PathBuf;

/// passbar - browse a pass store and copy passwords
#[derive(Parser)]
#[command(name = "passbar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to settings file
    #[arg(short, long, global = true, env = passbar_core::env::vars::PASSBAR_CONFIG)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "passbar=info",
            1 => "passbar=debug",
            _ => "passbar=trace",
        }
    }

    /// Load settings from `--config`, or the default location.
    pub fn load_settings(&self) -> anyhow::Result<Settings> {
        match &self.config {
            Some(path) => Ok(Settings::load(path)),
            None => Ok(Settings::load_default()?),
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive menu (default)
    Menu,

    /// Print the store tree
    List(commands::list::ListArgs),

    /// Decrypt an entry and copy its password to the clipboard
    Copy(commands::open::OpenArgs),

    /// Decrypt an entry and print its full contents
    Show(commands::open::OpenArgs),

    /// Settings management
    Config(commands::config::ConfigArgs),

    /// Check gpg and store setup
    Doctor,

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    if matches!(cli.command, Some(Commands::Version)) {
        println!("passbar {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut settings = cli.load_settings()?;
    match cli.command {
        None | Some(Commands::Menu) => repl::Menu::new(settings).run().await,
        Some(Commands::List(args)) => commands::list::run(args, &settings),
        Some(Commands::Copy(args)) => {
            commands::open::run(args, passbar_core::UserAction::Copy, &mut settings).await
        }
        Some(Commands::Show(args)) => {
            commands::open::run(args, passbar_core::UserAction::Show, &mut settings).await
        }
        Some(Commands::Config(args)) => commands::config::run(args, &mut settings),
        Some(Commands::Doctor) => commands::doctor::run(&settings),
        Some(Commands::Version) => Ok(()),
    }
}
