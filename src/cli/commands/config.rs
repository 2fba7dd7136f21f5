//! Config command implementations.
//!
//! This module implements the `vidx config` subcommands for managing
//! configuration without editing JSON directly.

use std::path::Path;

use crate::config::{FieldError, VidxConfig};

/// Result type for config command operations.
pub type ConfigCommandResult = Result<(), ConfigCommandError>;

/// Error type for config command operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigCommandError {
    /// Bad key, path or value.
    #[error("{0}")]
    FieldError(#[from] FieldError),

    /// The file could not be read, parsed or written.
    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    /// `config show` was given a section that does not exist.
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

/// Show all config values in a human-readable format.
pub fn config_show(path: Option<&Path>, section_filter: Option<&str>) -> ConfigCommandResult {
    let config = VidxConfig::load(path)?;

    println!("\x1b[1m=== vidx config ===\x1b[0m");
    println!();

    let sections: Vec<&str> = match section_filter {
        Some(filter) if VidxConfig::fields_for_section(filter).is_some() => vec![filter],
        Some(filter) => return Err(ConfigCommandError::UnknownSection(filter.into())),
        None => VidxConfig::section_names().to_vec(),
    };

    for section in sections {
        println!("\x1b[36m{section}\x1b[0m");
        if let Some(fields) = VidxConfig::fields_for_section(section) {
            for field in fields {
                let key = format!("{section}.{field}");
                let value = config.get_by_path(&key).unwrap_or_else(|_| "?".into());
                println!("  {:<24} {}", field, value);
            }
        }
        println!();
    }

    Ok(())
}

/// Get a specific config value.
pub fn config_get(path: Option<&Path>, key: &str) -> ConfigCommandResult {
    let config = VidxConfig::load(path)?;
    let value = config.get_by_path(key)?;
    println!("{value}");
    Ok(())
}

/// Set a config value.
pub fn config_set(path: Option<&Path>, key: &str, value: &str) -> ConfigCommandResult {
    let mut config = VidxConfig::load(path)?;
    let old_value = config.get_by_path(key).ok();

    config.set_by_path(key, value)?;
    config.save(path)?;

    let new_value = config.get_by_path(key)?;
    match old_value {
        Some(old) if old != new_value => {
            println!("\x1b[32m✓\x1b[0m {key}: {old} → {new_value}");
        }
        Some(_) => println!("\x1b[33m⚠\x1b[0m {key} unchanged: {new_value}"),
        None => println!("\x1b[32m✓\x1b[0m {key} = {new_value}"),
    }

    Ok(())
}

/// Reset config to defaults: everything, one section, or one field.
pub fn config_reset(path: Option<&Path>, key: Option<&str>) -> ConfigCommandResult {
    let mut config = VidxConfig::load(path)?;

    match key {
        Some(k) if VidxConfig::fields_for_section(k).is_some() => {
            config.reset_path(k)?;
            println!("\x1b[32m✓\x1b[0m Reset section '{k}' to defaults");
        }
        Some(k) if k.contains('.') => {
            config.reset_path(k)?;
            let new_value = config.get_by_path(k)?;
            println!("\x1b[32m✓\x1b[0m Reset {k} to default: {new_value}");
        }
        Some(k) => return Err(ConfigCommandError::UnknownSection(k.into())),
        None => {
            config = VidxConfig::default();
            println!("\x1b[32m✓\x1b[0m Reset all config to defaults");
        }
    }

    config.save(path)?;
    Ok(())
}

/// Print the config file location and whether it exists.
pub fn config_path(path: Option<&Path>) -> ConfigCommandResult {
    let file = path
        .map(Path::to_path_buf)
        .unwrap_or_else(VidxConfig::config_file);
    let state = if file.exists() { "" } else { " \x1b[2m(not created yet)\x1b[0m" };
    println!("{}{state}", file.display());
    Ok(())
}
