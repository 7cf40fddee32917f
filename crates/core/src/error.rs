//! Error kinds produced by feed operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors surfaced by the model, the gateway and the mutation operations
#[derive(Debug, Error)]
pub enum FeedError {
    /// The backing store does not exist yet
    #[error("No feed found at {path}. Run 'rsskeep new' to create one.")]
    NotFound { path: PathBuf },

    /// Stored content is not a valid feed document
    #[error("Malformed feed document: {reason}")]
    MalformedDocument { reason: String },

    /// Removal index outside the current item range
    #[error("Item index {index} is out of range (feed has {len} items)")]
    OutOfRange { index: i64, len: usize },

    /// Removal index text is not an integer
    #[error("'{input}' is not a valid item index")]
    InvalidIndex { input: String },

    /// A feed already exists and the policy forbids overwriting it
    #[error("A feed already exists at {path}")]
    AlreadyExists { path: PathBuf },

    /// The document could not be encoded
    #[error("Failed to encode feed document: {reason}")]
    Encode { reason: String },

    /// The backing store could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FeedError {
    /// Creates a `MalformedDocument` error from any displayable cause
    pub fn malformed(reason: impl ToString) -> Self {
        Self::MalformedDocument {
            reason: reason.to_string(),
        }
    }

    /// Creates an `Encode` error from any displayable cause
    pub fn encode(reason: impl ToString) -> Self {
        Self::Encode {
            reason: reason.to_string(),
        }
    }

    /// Creates an `Io` error for the given location
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the caller may re-prompt and try again
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::InvalidIndex { .. })
    }
}
