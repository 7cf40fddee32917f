//! In-memory feed store

use crate::gateway::FeedStore;
use rsskeep_core::{FeedDocument, FeedError, FeedResult};
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

/// Feed store holding the encoded document in a byte buffer
///
/// Goes through the same codec as [`FileFeedStore`](crate::FileFeedStore),
/// which makes it a faithful stand-in for tests.
#[derive(Debug)]
pub struct MemoryFeedStore {
    location: PathBuf,
    contents: RefCell<Option<Vec<u8>>>,
    read_only: bool,
}

impl MemoryFeedStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            location: PathBuf::from(":memory:"),
            contents: RefCell::new(None),
            read_only: false,
        }
    }

    /// Creates a store preloaded with raw bytes
    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.contents.replace(Some(contents.into()));
        store
    }

    /// Makes every write fail with a permission error
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Raw stored bytes, if any
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.contents.borrow().clone()
    }
}

impl Default for MemoryFeedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedStore for MemoryFeedStore {
    fn location(&self) -> &Path {
        &self.location
    }

    fn exists(&self) -> bool {
        self.contents.borrow().is_some()
    }

    fn load(&self) -> FeedResult<FeedDocument> {
        let contents = self.contents.borrow();
        let bytes = contents.as_ref().ok_or_else(|| FeedError::NotFound {
            path: self.location.clone(),
        })?;
        let text = std::str::from_utf8(bytes).map_err(FeedError::malformed)?;
        Ok(rsskeep_feed_codec::decode(text)?)
    }

    fn store(&self, doc: &FeedDocument) -> FeedResult<()> {
        let bytes = rsskeep_feed_codec::FeedEncoder::encode_to_vec(doc)?;
        if self.read_only {
            return Err(FeedError::io(
                &self.location,
                io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only"),
            ));
        }
        self.contents.replace(Some(bytes));
        Ok(())
    }
}
