//! `[policy]` section

use crate::validation::{ConfigSection, ValidationError};
use rsskeep_core::FeedPolicy;

impl ConfigSection for FeedPolicy {
    const NAME: &'static str = "policy";

    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        // every combination of switches is usable
        Ok(())
    }
}
