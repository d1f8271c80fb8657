//! The `squish config` command for configuration management.

use anyhow::Context;
use clap::{Args, Subcommand};
use squish_core::Config;
use std::path::Path;
use toml_edit::{value, DocumentMut, Item};

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Set a single value, e.g. `squish config set convert.quality 90`
    Set {
        /// Dotted key: <section>.<field>
        key: String,

        /// New value (booleans and integers are detected)
        value: String,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            println!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            println!("{}", Config::default_path().display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            write_config(&path, &Config::default().to_toml()?)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }

        ConfigCommand::Set { key, value } => {
            let path = Config::default_path();
            let current = if path.exists() {
                std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?
            } else {
                String::new()
            };

            let updated = set_value(&current, &key, &value)?;
            write_config(&path, &updated)?;

            tracing::info!(%key, %value, "Config value updated");
            println!("Set {key} = {value} in {}", path.display());
        }
    }

    Ok(())
}

/// Apply `key = raw` to a TOML document, keeping its comments and layout.
///
/// The key must exist in the default configuration and the resulting file
/// must pass validation.
pub fn set_value(document: &str, key: &str, raw: &str) -> anyhow::Result<String> {
    let (section, field) = key
        .split_once('.')
        .filter(|(s, f)| !s.is_empty() && !f.is_empty() && !f.contains('.'))
        .with_context(|| format!("Invalid key '{key}'. Expected <section>.<field>"))?;

    let defaults: DocumentMut = Config::default().to_toml()?.parse()?;
    let known = defaults
        .get(section)
        .and_then(Item::as_table_like)
        .is_some_and(|table| table.contains_key(field));
    if !known {
        anyhow::bail!("Unknown config key '{key}'.\n\n  Hint: run `squish config show` to list keys.");
    }

    let mut doc: DocumentMut = document.parse().context("Existing config is not valid TOML")?;
    if !doc.contains_table(section) {
        doc[section] = toml_edit::table();
    }
    doc[section][field] = parse_value(raw);

    let updated = doc.to_string();
    Config::from_toml_str(&updated).with_context(|| format!("Rejected value for '{key}'"))?;
    Ok(updated)
}

fn parse_value(raw: &str) -> Item {
    if let Ok(b) = raw.parse::<bool>() {
        value(b)
    } else if let Ok(n) = raw.parse::<i64>() {
        value(n)
    } else {
        value(raw)
    }
}

fn write_config(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
