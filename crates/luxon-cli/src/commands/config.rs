//! Config command implementation.

use anyhow::{Context, Result, bail};
use luxon_cli::config::Config;

use crate::cli::ConfigAction;

pub fn cmd_config(action: ConfigAction, quiet: bool) -> Result<()> {
    let path = Config::path();
    match action {
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            let config = Config::load();
            let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            if !quiet {
                eprintln!("# {}", path.display());
            }
            print!("{}", content);
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "Config already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Config::initial().save()?;
            if !quiet {
                eprintln!("Wrote default config to {}", path.display());
            }
        }
    }
    Ok(())
}
