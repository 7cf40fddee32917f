// crates/feed-codec/src/error.rs
//! Error types for feed encoding and decoding

use rsskeep_core::FeedError;
use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding a feed document
#[derive(Debug, Error)]
pub enum CodecError {
    /// Invalid XML structure
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    /// Element found where the feed shape does not allow it
    #[error("Unexpected element <{0}>")]
    UnexpectedElement(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Root element declares a version other than 2.0
    #[error("Unsupported RSS version: {0}")]
    UnsupportedVersion(String),

    /// Document content that cannot appear in well-formed XML 1.0
    #[error("Cannot encode {field}: {reason}")]
    Unencodable { field: String, reason: String },

    /// IO error while writing the encoded document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    XmlParse(String),
}

impl From<quick_xml::Error> for CodecError {
    fn from(err: quick_xml::Error) -> Self {
        CodecError::XmlParse(err.to_string())
    }
}

impl From<CodecError> for FeedError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Io(source) => FeedError::encode(source),
            unencodable @ CodecError::Unencodable { .. } => FeedError::encode(unencodable),
            other => FeedError::malformed(other),
        }
    }
}
