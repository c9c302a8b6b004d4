//! Config command implementation

use crate::cli::context::CliContext;
use crate::cli::ConfigAction;
use crate::config::{ConfigKey, GlobalConfig};
use anyhow::Result;
use colored::Colorize;

/// Execute the config command
pub fn execute(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = CliContext::effective_config()?;
            print!("{}", config.to_toml()?);
        },
        ConfigAction::List => {
            let config = CliContext::effective_config()?;
            let values = config.list();
            if values.is_empty() && !CliContext::is_quiet() {
                eprintln!("{}", "No configuration values set".dimmed());
            }
            for (key, value) in values {
                println!("{} = {}", key.cyan(), value);
            }
        },
        ConfigAction::Path => {
            let path = match CliContext::get().and_then(|ctx| ctx.config_path) {
                Some(path) => path,
                None => GlobalConfig::get_config_path()?,
            };
            println!("{}", path.display());
        },
        ConfigAction::Get { key } => {
            let config_key = ConfigKey::from_str(&key)
                .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
            let config = CliContext::effective_config()?;
            match config.get(config_key) {
                Some(value) => println!("{}", value),
                None => {
                    if !CliContext::is_quiet() {
                        eprintln!("{}", format!("{} is not set", key).yellow());
                    }
                },
            }
        },
    }

    Ok(())
}
