use crate::models::Config;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let beltime_dir = config_dir.join(".beltime");
    std::fs::create_dir_all(&beltime_dir)
        .with_context(|| format!("Failed to create config directory {}", beltime_dir.display()))?;

    Ok(beltime_dir)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

/// Resolves an explicit path, falling back to the per-user config file.
pub fn resolve_config_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => get_config_path(),
    }
}

/// Loads the config at `config_path`, writing the defaults there first if the
/// file does not exist yet.
pub fn load_config(config_path: &Path) -> Result<Config> {
    if config_path.exists() {
        debug!("Loading config from {}", config_path.display());
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!(
                "Failed to parse config file: {}. Please check the file format.",
                e
            )
        })?;

        config.validate()?;
        Ok(config)
    } else {
        info!("No config at {}, writing defaults", config_path.display());
        let default_config = Config::default();
        save_config(&default_config, config_path)?;
        Ok(default_config)
    }
}

pub fn save_config(config: &Config, config_path: &Path) -> Result<()> {
    config.validate()?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut contents = toml::to_string_pretty(config)?;

    // toml writes an empty table header for an empty map
    if config.custom_settings.is_empty() {
        contents = contents.replace("\n[custom_settings]\n", "\n");
        contents = contents.replace("[custom_settings]\n", "");
    }

    std::fs::write(config_path, contents.trim_end().to_string() + "\n")
        .with_context(|| format!("Failed to write config file {}", config_path.display()))?;

    Ok(())
}
