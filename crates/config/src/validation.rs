//! Per-section validation rules

use std::path::Path;
use thiserror::Error;

/// A rejected config value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}{}", .value.as_ref().map(|v| format!(" (got '{}')", v)).unwrap_or_default())]
pub struct ValidationError {
    /// Dotted key, e.g. `feed.path`
    pub field: String,
    pub message: String,
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Attaches the offending value to the message
    pub fn with_value(mut self, value: impl ToString) -> Self {
        self.value = Some(value.to_string());
        self
    }
}

/// A `[table]` of the config file
pub trait ConfigSection: Default {
    /// TOML table name, used as the prefix of field names in errors
    const NAME: &'static str;

    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Dotted field name inside this section
    fn field(key: &str) -> String {
        format!("{}.{}", Self::NAME, key)
    }
}

/// Checks that `path` can name the feed file
pub fn feed_file_path(path: &Path, field: &str) -> Option<ValidationError> {
    if path.as_os_str().is_empty() {
        return Some(ValidationError::new(field, "must not be empty"));
    }

    let trailing_separator = path
        .to_str()
        .is_some_and(|s| s.ends_with('/') || s.ends_with('\\'));
    if trailing_separator || path.file_name().is_none() {
        return Some(
            ValidationError::new(field, "must name a file, not a directory").with_value(path.display()),
        );
    }
    None
}

/// Turns collected problems into a section result
pub fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
