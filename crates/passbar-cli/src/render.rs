//! Terminal rendering utilities.
//!
//! Catalog trees, the recents list, and the menu banner and help.

use console::style;
use passbar_core::recents::RecentsTracker;
use passbar_core::types::StoreEntry;
use std::path::Path;

/// Lines of the catalog tree, indented two spaces per level.
///
/// With `numbered`, secrets carry the 1-based index the menu accepts; the
/// numbering follows the same depth-first order as `catalog::secrets`.
pub fn format_tree(entries: &[StoreEntry], numbered: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut counter = 0;
    format_level(entries, 0, numbered, &mut counter, &mut lines);
    lines
}

fn format_level(
    entries: &[StoreEntry],
    depth: usize,
    numbered: bool,
    counter: &mut usize,
    lines: &mut Vec<String>,
) {
    let indent = "  ".repeat(depth);
    for entry in entries {
        if entry.is_group() {
            lines.push(format!("{indent}{}/", entry.name));
            format_level(entry.children(), depth + 1, numbered, counter, lines);
        } else if numbered {
            *counter += 1;
            lines.push(format!("{indent}{:>3}. {}", *counter, entry.name));
        } else {
            lines.push(format!("{indent}{}", entry.name));
        }
    }
}

/// Recents menu lines, `r1.` first. The placeholder is not numbered.
pub fn format_recents(recents: &RecentsTracker) -> Vec<String> {
    if recents.is_empty() {
        return recents.labels().iter().map(|l| format!("     {l}")).collect();
    }
    recents
        .labels()
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{:>4}. {label}", format!("r{}", i + 1)))
        .collect()
}

/// Print the numbered catalog.
pub fn render_catalog(entries: &[StoreEntry]) {
    if entries.is_empty() {
        println!("{}", style("  (store is empty)").dim());
        return;
    }
    for line in format_tree(entries, true) {
        if line.ends_with('/') {
            println!("{}", style(line).bold());
        } else {
            println!("{line}");
        }
    }
}

/// Print the recents section.
pub fn render_recents(recents: &RecentsTracker) {
    println!("{}", style("Recents").bold().underlined());
    for line in format_recents(recents) {
        if recents.is_empty() {
            println!("{}", style(line).dim());
        } else {
            println!("{line}");
        }
    }
}

/// Print the menu header.
pub fn render_welcome(store_root: &Path) {
    eprintln!(
        "{} {}",
        style("passbar").bold().cyan(),
        style(format!("({})", store_root.display())).dim(),
    );
    eprintln!("{}", style("Type a number to open an entry, /help for commands.").dim());
    eprintln!();
}

/// Print the help message.
pub fn render_help() {
    eprintln!("{}", style("Available commands:").bold());
    eprintln!("  {}          - Open secret n", style("<n>").cyan());
    eprintln!("  {}         - Open recent n", style("r<n>").cyan());
    eprintln!("  {}       - Set password store directory", style("/store").cyan());
    eprintln!("  {}  - Set gpg binary path", style("/gpg-binary").cyan());
    eprintln!("  {}    - Set gpg home directory", style("/gpg-home").cyan());
    eprintln!("  {}     - Rescan the store and show the menu", style("/refresh").cyan());
    eprintln!("  {}        - Show this help", style("/help").cyan());
    eprintln!("  {}        - Exit", style("/quit").cyan());
    eprintln!();
}
