//! rsskeep configuration
//!
//! One TOML file with three tables: `[app]` (log level), `[feed]` (which
//! file to edit) and `[policy]` (how feeds and items are built). Every key is
//! optional; anything left out takes its default.
//!
//! ```no_run
//! use rsskeep_config::ConfigManager;
//!
//! let manager = ConfigManager::new()?;
//! let config = manager.load_with_env_overrides()?;
//! println!("editing {}", config.feed.path.display());
//! # Ok::<(), rsskeep_config::ConfigError>(())
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

pub mod app_config;
mod feed_config;
mod policy_config;

pub use error::{ConfigError, ConfigResult};
pub use manager::{ConfigManager, CONFIG_FILE_NAME, ENV_FEED_PATH, ENV_LOG_LEVEL};
pub use validation::{ConfigSection, ValidationError};

pub use app_config::{AppConfig, LogLevel};
pub use feed_config::FeedConfig;
pub use rsskeep_core::FeedPolicy;

use serde::{Deserialize, Serialize};

/// Format version written by this build
pub const CONFIG_VERSION: u32 = 1;

/// Contents of `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub version: u32,

    pub app: AppConfig,

    /// Feed file location
    pub feed: FeedConfig,

    /// Feed creation and mutation behaviour
    pub policy: FeedPolicy,
}

impl Config {
    /// Problems found in every section
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [
            self.app.validate(),
            self.feed.validate(),
            self.policy.validate(),
        ]
        .into_iter()
        .filter_map(Result::err)
        .flatten()
        .collect();
        validation::finish(errors)
    }

    /// Same as `validate`, as a `ConfigError::Invalid`
    pub fn check(&self) -> ConfigResult<()> {
        self.validate().map_err(ConfigError::Invalid)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            feed: FeedConfig::default(),
            policy: FeedPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.check().is_ok());
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.policy, FeedPolicy::default());
    }

    #[test]
    fn test_tables_in_toml() {
        let text = toml::to_string_pretty(&Config::default()).expect("serialize");
        for table in ["[app]", "[feed]", "[policy]"] {
            assert!(text.contains(table), "{} missing from\n{}", table, text);
        }
    }

    #[test]
    fn test_check_reports_feed_path() {
        let mut config = Config::default();
        config.feed.path = std::path::PathBuf::new();

        let err = config.check().unwrap_err();
        assert_eq!(err.validation_errors()[0].field, "feed.path");
    }
}
