//! Settings management commands.

use clap::Args;
use passbar_core::config::{SettingKey, Settings};

/// Config command arguments.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(clap::Subcommand)]
pub enum ConfigCommand {
    /// Show effective settings
    Show,

    /// Get a setting value
    Get {
        /// Setting key (store_home, gpg_binary_path, gpg_home, max_recent_items)
        key: String,
    },

    /// Set a setting value and save it
    Set {
        /// Setting key
        key: String,

        /// Value to set
        value: String,
    },

    /// Show settings file path
    Path,
}

/// Effective settings as JSON, defaults applied.
pub fn effective_json(settings: &Settings) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for key in SettingKey::ALL {
        let value = match key {
            SettingKey::MaxRecentItems => serde_json::json!(settings.max_recent_items()),
            _ => serde_json::Value::String(settings.get(key)),
        };
        map.insert(key.as_str().to_string(), value);
    }
    serde_json::Value::Object(map)
}

/// Run the config command.
pub fn run(args: ConfigArgs, settings: &mut Settings) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let json = serde_json::to_string_pretty(&effective_json(settings))?;
            println!("{}", json);
        }

        ConfigCommand::Get { key } => {
            let key: SettingKey = key.parse()?;
            println!("{}", settings.get(key));
        }

        ConfigCommand::Set { key, value } => {
            let key: SettingKey = key.parse()?;
            settings.set(key, &value)?;
            settings.commit()?;
            println!("Set {} = {}", key, settings.get(key));
        }

        ConfigCommand::Path => {
            println!("{}", settings.path().display());
        }
    }

    Ok(())
}
