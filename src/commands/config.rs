use std::path::Path;

use crate::{
    cli::ConfigCmd,
    types::{Config, KNOWN_KEYS},
};
use anyhow::Result;
use colored::Colorize;

pub fn handle(cmd: ConfigCmd, config_path: &Path) -> Result<()> {
    let mut cfg = Config::load(config_path)?;

    match cmd {
        ConfigCmd::List => {
            if cfg.map.is_empty() {
                println!("{}", "(no config set)".dimmed());
            } else {
                println!("{}", "Config:".cyan().bold());
                for (k, v) in &cfg.map {
                    println!("  {} = {}", k.green(), v);
                }
            }
        }

        ConfigCmd::Get { key } => match cfg.map.get(&key) {
            Some(val) => println!("{}", val),
            None => println!("{} key `{}` not found", "warning:".yellow().bold(), key),
        },

        ConfigCmd::Set { key, val } => {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                println!(
                    "{} `{}` is not a key barlog reads (known: {})",
                    "warning:".yellow().bold(),
                    key,
                    KNOWN_KEYS.join(", ")
                );
            }
            cfg.map.insert(key.clone(), val.clone());
            // Reject values that would break every later command.
            cfg.settings(None)?;
            cfg.save(config_path)?;
            tracing::info!(%key, "config updated");
            println!("{} set `{}` = `{}`", "info:".blue().bold(), key.green(), val);
        }

        ConfigCmd::Unset { key } => {
            if cfg.map.remove(&key).is_some() {
                cfg.save(config_path)?;
                println!("{} removed `{}`", "info:".blue().bold(), key.green());
            } else {
                println!("{} key `{}` not found", "warning:".yellow().bold(), key);
            }
        }
    }

    Ok(())
}
