//! Diagnostic commands.

use console::{style, Emoji};
use passbar_core::config::Settings;
use passbar_core::paths;
use passbar_store::catalog;

static CHECK: Emoji = Emoji("✓", "+");
static CROSS: Emoji = Emoji("✗", "x");
static WARN: Emoji = Emoji("⚠", "!");

/// Run the doctor command.
pub fn run(settings: &Settings) -> anyhow::Result<()> {
    println!("passbar Doctor\n");

    let mut errors = 0;
    let mut warnings = 0;

    println!("Checking settings...");
    if settings.path().exists() {
        println!("  {} Settings file: {}", style(CHECK).green(), settings.path().display());
    } else {
        println!(
            "  {} No settings file yet, using defaults ({})",
            style(WARN).yellow(),
            settings.path().display()
        );
        warnings += 1;
    }

    println!("\nChecking gpg...");
    let binary = settings.gpg_binary_path();
    if paths::is_file(&binary) {
        println!("  {} gpg binary: {}", style(CHECK).green(), binary.display());
    } else if binary.as_os_str().is_empty() {
        println!("  {} gpg not found on PATH", style(CROSS).red());
        errors += 1;
    } else {
        println!("  {} gpg binary missing: {}", style(CROSS).red(), binary.display());
        errors += 1;
    }

    let home = settings.gpg_home();
    if paths::is_dir(&home) {
        println!("  {} gpg home: {}", style(CHECK).green(), home.display());
    } else {
        println!("  {} gpg home missing: {}", style(CROSS).red(), home.display());
        errors += 1;
    }

    println!("\nChecking password store...");
    let store = settings.store_home();
    if paths::is_dir(&store) {
        let count = catalog::secrets(&catalog::build(&store)).len();
        println!(
            "  {} Store: {} ({} secrets)",
            style(CHECK).green(),
            store.display(),
            count
        );
        if count == 0 {
            println!("  {} Store has no .gpg files", style(WARN).yellow());
            warnings += 1;
        }
    } else {
        println!("  {} Store directory missing: {}", style(CROSS).red(), store.display());
        errors += 1;
    }

    // Summary
    println!("\n{}", style("Summary").bold());
    println!("  Errors: {}", if errors > 0 { style(errors).red() } else { style(errors).green() });
    println!(
        "  Warnings: {}",
        if warnings > 0 { style(warnings).yellow() } else { style(warnings).green() }
    );

    if errors > 0 {
        anyhow::bail!("{} error(s) found", errors);
    }

    Ok(())
}
