//! Reading and writing `config.toml`

use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Loads the config file
    ///
    /// A missing file yields defaults. A blank or unparsable file is an error
    /// so a damaged config is never silently replaced. Invalid values only
    /// warn, which keeps `rsskeep config` usable for fixing them.
    pub fn load(&self) -> ConfigResult<Config> {
        let Some(text) = self.read_text()? else {
            log::debug!("No config at {}, using defaults", self.config_path.display());
            return Ok(Config::default());
        };

        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: self.config_path.clone(),
            source,
        })?;

        if config.version > CONFIG_VERSION {
            log::warn!(
                "{} has format version {}, this build understands {}",
                self.config_path.display(),
                config.version,
                CONFIG_VERSION
            );
        }
        if let Err(e) = config.check() {
            log::warn!("{}", e);
        }

        Ok(config)
    }

    /// Validates and writes `config`, replacing the file in one rename
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        config.check()?;
        let text = toml::to_string_pretty(config)?;

        let dir = match self.config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        self.replace_with(dir, &text)
            .map_err(|source| ConfigError::Write {
                path: self.config_path.clone(),
                source,
            })?;

        log::info!("Saved config to {}", self.config_path.display());
        Ok(())
    }

    fn read_text(&self) -> ConfigResult<Option<String>> {
        let read_error = |source| ConfigError::Read {
            path: self.config_path.clone(),
            source,
        };

        let text = match fs::read_to_string(&self.config_path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(read_error(e)),
        };

        if text.trim().is_empty() {
            return Err(read_error(io::Error::new(
                io::ErrorKind::InvalidData,
                "config file is blank",
            )));
        }
        Ok(Some(text))
    }

    fn replace_with(&self, dir: &Path, text: &str) -> io::Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            log::debug!("Created config directory {}", dir.display());
        }

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(text.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.config_path).map_err(|e| e.error)?;
        Ok(())
    }
}
