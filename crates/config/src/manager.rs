//! Entry point for locating, loading and writing the config

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel, ValidationError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Overrides `feed.path`
pub const ENV_FEED_PATH: &str = "RSSKEEP_FEED_PATH";

/// Overrides `app.log_level`
pub const ENV_LOG_LEVEL: &str = "RSSKEEP_LOG_LEVEL";

/// Owns the location of one config file
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Uses `config.toml` in the platform config directory
    /// (`~/.config/rsskeep` on Linux, `~/Library/Application Support/rsskeep`
    /// on macOS, `%APPDATA%\rsskeep\config` on Windows)
    pub fn new() -> ConfigResult<Self> {
        let dirs = ProjectDirs::from("", "", "rsskeep").ok_or(ConfigError::NoConfigDir)?;
        Self::with_directory(dirs.config_dir().to_path_buf())
    }

    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        Ok(Self::with_file(config_dir.join(CONFIG_FILE_NAME)))
    }

    /// Uses an explicit file, as given by `--config`
    pub fn with_file(config_path: PathBuf) -> Self {
        Self {
            persistence: ConfigPersistence::new(config_path.clone()),
            config_path,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Writes the default config unless a file is already there
    ///
    /// Returns whether a file was written.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path.exists() {
            log::debug!("Keeping existing config {}", self.config_path.display());
            return Ok(false);
        }

        self.save(&Config::default())?;
        Ok(true)
    }

    /// Problems in the current config file, empty when it is valid
    pub fn validate(&self) -> ConfigResult<Vec<ValidationError>> {
        Ok(self.load()?.validate().err().unwrap_or_default())
    }

    /// `load` followed by `RSSKEEP_FEED_PATH` / `RSSKEEP_LOG_LEVEL` overrides
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }
}

fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(ENV_FEED_PATH).filter(|p| !p.trim().is_empty()) {
        log::debug!("{} sets feed path to {}", ENV_FEED_PATH, path);
        config.feed.path = PathBuf::from(path);
    }

    if let Some(raw) = lookup(ENV_LOG_LEVEL) {
        match raw.parse::<LogLevel>() {
            Ok(level) => config.app.log_level = level,
            Err(e) => log::warn!("Ignoring {}: {}", ENV_LOG_LEVEL, e),
        }
    }

    if let Err(e) = config.check() {
        log::warn!("After environment overrides: {}", e);
    }
}
