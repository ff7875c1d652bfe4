//! Catalog listing.

use crate::render;
use clap::Args;
use passbar_core::config::Settings;
use passbar_store::catalog;

/// List command arguments.
#[derive(Args)]
pub struct ListArgs {
    /// One store-relative name per line instead of a tree
    #[arg(long)]
    pub flat: bool,
}

/// Run the list command.
pub fn run(args: ListArgs, settings: &Settings) -> anyhow::Result<()> {
    let root = settings.store_home();
    let entries = catalog::build(&root);

    if args.flat {
        for entry in catalog::secrets(&entries) {
            println!("{}", catalog::relative_name(&root, entry));
        }
    } else {
        for line in render::format_tree(&entries, false) {
            println!("{line}");
        }
    }
    Ok(())
}
