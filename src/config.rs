//! User configuration.
//!
//! Loaded from `<config dir>/heimdall/config.json`; every field is optional so
//! a missing file behaves like an empty one.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
const LOG_LEVEL_ENV: &str = "HEIMDALL_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default tracing level when no filter directive is set.
    pub log_level: String,
    /// Seed the interactive builder from, and copy results to, the clipboard.
    pub clipboard: bool,
    /// Top-level commands hidden from the interactive builder.
    pub ignored_commands: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            clipboard: true,
            ignored_commands: vec!["interactive".to_string()],
        }
    }
}

/// Default config directory (`~/.config/heimdall` on Linux).
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("heimdall"))
}

/// Load the config, falling back to defaults when no file exists.
pub fn load(config_dir: Option<&Path>) -> Result<Config> {
    let dir = match config_dir {
        Some(dir) => Some(dir.to_path_buf()),
        None => default_config_dir(),
    };
    let mut config = match dir.map(|dir| dir.join(CONFIG_FILE)) {
        Some(path) if path.is_file() => read_config(&path)?,
        _ => Config::default(),
    };
    if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
        if !level.trim().is_empty() {
            config.log_level = level.trim().to_string();
        }
    }
    validate(&config)?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse config {}", path.display()))
}

fn validate(config: &Config) -> Result<()> {
    if config.log_level.trim().is_empty() {
        return Err(anyhow!("log_level must be non-empty"));
    }
    if let Some(name) = config.ignored_commands.iter().find(|n| n.trim().is_empty()) {
        return Err(anyhow!("ignored_commands contains an empty name ({name:?})"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = load(Some(dir.path())).expect("load config");
        assert!(config.clipboard);
        assert_eq!(config.ignored_commands, vec!["interactive".to_string()]);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join(CONFIG_FILE), r#"{"clipboard": false}"#).expect("write config");
        let config = load(Some(dir.path())).expect("load config");
        assert!(!config.clipboard);
        assert_eq!(config.ignored_commands, vec!["interactive".to_string()]);
    }

    #[test]
    fn invalid_json_names_the_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join(CONFIG_FILE), "{").expect("write config");
        let err = load(Some(dir.path())).expect_err("invalid config");
        assert!(format!("{err:#}").contains(CONFIG_FILE));
    }

    #[test]
    fn empty_ignored_command_is_rejected() {
        let config = Config {
            ignored_commands: vec![" ".to_string()],
            ..Config::default()
        };
        assert!(validate(&config).is_err());
    }
}
