//! Feed persistence and mutation operations
//!
//! The store is the only place a [`FeedDocument`](rsskeep_core::FeedDocument)
//! meets a backing medium. Every mutation is a full load, an in-memory change
//! and a full rewrite:
//!
//! ```rust
//! use rsskeep_core::{ChannelFields, FeedPolicy, ItemFields};
//! use rsskeep_store::{FeedService, MemoryFeedStore};
//!
//! let service = FeedService::new(MemoryFeedStore::new(), FeedPolicy::default());
//! service
//!     .initialize(ChannelFields {
//!         title: "T".into(),
//!         link: "http://l".into(),
//!         description: "D".into(),
//!     })
//!     .expect("Failed to initialize feed");
//!
//! let doc = service
//!     .add(ItemFields {
//!         title: "A".into(),
//!         link: "http://a".into(),
//!         pub_date: "2024-01-02".into(),
//!         description: "x".into(),
//!     })
//!     .expect("Failed to add item");
//! assert_eq!(doc.item_count(), 1);
//! ```

mod file_store;
mod gateway;
mod memory_store;
mod service;

pub use file_store::FileFeedStore;
pub use gateway::FeedStore;
pub use memory_store::MemoryFeedStore;
pub use service::FeedService;
