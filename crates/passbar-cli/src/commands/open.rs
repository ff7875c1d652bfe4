//! One-shot `copy` and `show`.

use crate::terminal::TerminalPresenter;
use clap::Args;
use passbar_core::config::Settings;
use passbar_core::presenter::UserAction;
use passbar_core::recents::RecentsTracker;
use passbar_store::setup::configure_crypto_client;
use passbar_store::{catalog, Outcome, PassphraseWorkflow, StoreError};
use tracing::info;

/// Arguments for `copy` and `show`.
#[derive(Args)]
pub struct OpenArgs {
    /// Store-relative entry name, e.g. `Email/work`
    pub name: String,
}

/// Run the passphrase workflow for one entry with `action` preselected.
pub async fn run(args: OpenArgs, action: UserAction, settings: &mut Settings) -> anyhow::Result<()> {
    let root = settings.store_home();
    let entries = catalog::build(&root);
    let entry = catalog::find(&entries, &args.name)
        .cloned()
        .ok_or_else(|| StoreError::NotFound(args.name.clone()))?;

    let mut presenter = TerminalPresenter::with_action(action);
    let client = configure_crypto_client(settings, &mut presenter)?;
    let mut recents = RecentsTracker::new(settings.max_recent_items());

    let outcome = PassphraseWorkflow::new(&client, &mut presenter, &mut recents)
        .resolve(&entry)
        .await?;

    // Exhaustion is silent here as in the menu.
    if matches!(outcome, Outcome::Cancelled | Outcome::Exhausted) {
        info!(entry = %args.name, ?outcome, "nothing copied or shown");
    }
    Ok(())
}
