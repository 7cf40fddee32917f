// crates/feed-codec/src/lib.rs
//! RSS 2.0 encoding and decoding for rsskeep feed documents
//!
//! This crate maps a [`FeedDocument`] to and from its on-disk XML form:
//! - `<rss version="2.0">` root with optional `xmlns:*` declarations
//! - exactly one `<channel>` with title, link and description
//! - zero or more `<item>` elements with title, link, pubDate, description
//!   and an optional guid
//!
//! Decoding is the exact inverse of encoding for every modeled field.
//!
//! # Example
//!
//! ```rust
//! use rsskeep_core::{FeedDocument, Item};
//! use rsskeep_feed_codec::{decode, encode};
//!
//! let mut doc = FeedDocument::new("My Feed", "http://example.com", "Posts");
//! doc.append_item(Item::new("Hello", "http://example.com/1", "2024-01-02", "First"));
//!
//! let xml = encode(&doc).expect("Failed to encode feed");
//! let back = decode(&xml).expect("Failed to decode feed");
//! assert_eq!(doc, back);
//! ```

mod decoder;
mod encoder;
mod error;

pub use decoder::FeedDecoder;
pub use encoder::FeedEncoder;
pub use error::{CodecError, CodecResult};

use rsskeep_core::FeedDocument;

/// Number of spaces per nesting level in encoded output
pub const INDENT_SIZE: usize = 2;

/// Encodes a document to its XML text
pub fn encode(doc: &FeedDocument) -> CodecResult<String> {
    FeedEncoder::encode(doc)
}

/// Decodes a document from XML text
pub fn decode(content: &str) -> CodecResult<FeedDocument> {
    FeedDecoder::decode(content)
}
