//! Command-line configuration.

use anyhow::Result;
use cellcheck_core::{SessionConfig, DEFAULT_PRELUDE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_checker")]
    pub checker: PathBuf,
    #[serde(default)]
    pub checker_flags: Vec<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_prelude")]
    pub prelude: String,
}

fn default_checker() -> PathBuf {
    PathBuf::from("mypy")
}

fn default_enabled() -> bool {
    true
}

fn default_prelude() -> String {
    DEFAULT_PRELUDE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            checker: default_checker(),
            checker_flags: Vec::new(),
            enabled: default_enabled(),
            debug: false,
            prelude: default_prelude(),
        }
    }
}

impl Config {
    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from the user config directory or fall back to defaults.
    pub fn load() -> Result<Self> {
        match default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            checker_program: self.checker.clone(),
            extra_flags: self.checker_flags.clone(),
            enabled: self.enabled,
            debug: self.debug,
            prelude: self.prelude.clone(),
        }
    }
}

/// `<config_dir>/cellcheck/config.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cellcheck").join("config.toml"))
}
