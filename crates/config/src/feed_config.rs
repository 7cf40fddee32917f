//! `[feed]` section

use crate::validation::{self, ConfigSection, ValidationError};
use rsskeep_core::DEFAULT_FEED_FILE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the feed document lives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// Feed file path (relative paths resolve against the working directory)
    pub path: PathBuf,

    /// Copy the previous feed to `<path>.backup` before each write
    pub keep_backup: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_FEED_FILE),
            keep_backup: false,
        }
    }
}

impl ConfigSection for FeedConfig {
    const NAME: &'static str = "feed";

    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors = validation::feed_file_path(&self.path, &Self::field("path"))
            .into_iter()
            .collect();
        validation::finish(errors)
    }
}
