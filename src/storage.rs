use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::ConfigFile;

pub(crate) fn config_path() -> Result<PathBuf> {
    if let Some(mut dir) = dirs::config_dir() {
        dir.push("droidbrowse");
        dir.push("config.json");
        return Ok(dir);
    }
    let mut fallback = std::env::current_dir().context("current dir")?;
    fallback.push("droidbrowse-config.json");
    Ok(fallback)
}

pub(crate) fn log_path() -> Result<PathBuf> {
    if let Some(mut dir) = dirs::data_dir() {
        dir.push("droidbrowse");
        dir.push("session.log");
        return Ok(dir);
    }
    let mut fallback = std::env::current_dir().context("current dir")?;
    fallback.push("droidbrowse-session.log");
    Ok(fallback)
}

/// Loads the config file, creating it with defaults on first run.
pub(crate) fn load_or_init_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path).context("read config file")?;
        let config = serde_json::from_str(&content).context("parse config file")?;
        return Ok(config);
    }
    let config = ConfigFile::default();
    save_config(path, &config)?;
    Ok(config)
}

pub(crate) fn save_config(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create config dir")?;
    }
    let content = serde_json::to_string_pretty(config).context("serialize config")?;
    fs::write(path, content).context("write config file")?;
    Ok(())
}
