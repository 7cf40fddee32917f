//! Storage abstraction for feed documents

use rsskeep_core::{FeedDocument, FeedResult};
use std::path::Path;

/// Single read path and single write path for a feed document
///
/// Implementations must read and write the whole document. `store` replaces
/// any previous content and never appends.
pub trait FeedStore {
    /// Human-readable location used in error messages
    fn location(&self) -> &Path;

    /// Returns true if a document is currently stored
    fn exists(&self) -> bool;

    /// Reads and decodes the stored document
    ///
    /// Fails with `NotFound` when nothing is stored and `MalformedDocument`
    /// when the content cannot be decoded.
    fn load(&self) -> FeedResult<FeedDocument>;

    /// Encodes `doc` and replaces the stored content with it
    fn store(&self, doc: &FeedDocument) -> FeedResult<()>;
}

impl<S: FeedStore + ?Sized> FeedStore for &S {
    fn location(&self) -> &Path {
        (**self).location()
    }

    fn exists(&self) -> bool {
        (**self).exists()
    }

    fn load(&self) -> FeedResult<FeedDocument> {
        (**self).load()
    }

    fn store(&self, doc: &FeedDocument) -> FeedResult<()> {
        (**self).store(doc)
    }
}
