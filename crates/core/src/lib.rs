//! Feed document model for rsskeep
//!
//! This crate owns the in-memory representation of a single RSS 2.0 feed and
//! the pure mutations applied to it. It never touches the filesystem; loading
//! and storing happen in `rsskeep-store`, encoding in `rsskeep-feed-codec`.
//!
//! # Example
//!
//! ```rust
//! use rsskeep_core::{FeedDocument, Item};
//!
//! let mut doc = FeedDocument::new("My Feed", "http://example.com", "Posts");
//! doc.append_item(Item::new("Hello", "http://example.com/1", "2024-01-02", "First post"));
//! doc.append_item(Item::new("Again", "http://example.com/2", "2024-03-01", "Second post"));
//! doc.sort_items_by_date();
//!
//! assert_eq!(doc.channel().items()[0].title, "Again");
//! ```

pub mod document;
pub mod error;
pub mod index;
pub mod item;
pub mod policy;

pub use document::{Channel, ChannelFields, FeedDocument, ItemSummary, Namespace, RSS_VERSION};
pub use error::{FeedError, FeedResult};
pub use index::parse_index;
pub use item::{Item, ItemFields};
pub use policy::{FeedPolicy, ATOM_NAMESPACE_PREFIX, ATOM_NAMESPACE_URI};

/// Conventional file name for the feed document
pub const DEFAULT_FEED_FILE: &str = "rss.xml";
