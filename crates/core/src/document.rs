//! Feed document and channel structures

use crate::error::{FeedError, FeedResult};
use crate::item::Item;
use crate::policy::FeedPolicy;
use serde::Serialize;

/// RSS protocol version written to and required from every document
pub const RSS_VERSION: &str = "2.0";

/// An XML namespace declared on the document root (`xmlns:prefix="uri"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Namespace {
    pub prefix: String,
    pub uri: String,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }
}

/// Raw channel values collected from the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelFields {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// Position and title of an item, as shown in menus and listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummary {
    pub index: usize,
    pub title: String,
    pub pub_date: String,
}

/// The single channel of a feed
///
/// Channel metadata is fixed at creation. Items are owned by the channel and
/// only change through [`FeedDocument`] mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Channel {
    title: String,
    link: String,
    description: String,
    items: Vec<Item>,
}

impl Channel {
    /// Creates a channel with no items
    pub fn new(fields: ChannelFields) -> Self {
        Self::with_items(fields, Vec::new())
    }

    /// Creates a channel holding `items` in the given order
    pub fn with_items(fields: ChannelFields, items: Vec<Item>) -> Self {
        Self {
            title: fields.title,
            link: fields.link,
            description: fields.description,
            items,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Items in their current order
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

/// A complete RSS 2.0 feed: root attributes plus exactly one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedDocument {
    version: String,
    namespaces: Vec<Namespace>,
    channel: Channel,
}

impl FeedDocument {
    /// Creates a feed with an empty channel and no namespace declarations
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::from_channel(Channel::new(ChannelFields {
            title: title.into(),
            link: link.into(),
            description: description.into(),
        }))
    }

    /// Wraps an existing channel in a version 2.0 document
    pub fn from_channel(channel: Channel) -> Self {
        Self {
            version: RSS_VERSION.to_string(),
            namespaces: Vec::new(),
            channel,
        }
    }

    /// Creates a feed whose root attributes follow `policy`
    pub fn from_policy(fields: ChannelFields, policy: &FeedPolicy) -> Self {
        let mut doc = Self::from_channel(Channel::new(fields));
        doc.namespaces = policy.namespaces();
        doc
    }

    /// Declares a namespace on the root element
    ///
    /// A prefix that is already declared keeps its position and takes the new uri.
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        let ns = Namespace::new(prefix, uri);
        match self.namespaces.iter_mut().find(|n| n.prefix == ns.prefix) {
            Some(existing) => existing.uri = ns.uri,
            None => self.namespaces.push(ns),
        }
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Returns the number of items in the feed
    pub fn item_count(&self) -> usize {
        self.channel.items.len()
    }

    /// Returns true if the feed has no items
    pub fn is_empty(&self) -> bool {
        self.channel.items.is_empty()
    }

    /// Appends an item to the end of the channel
    pub fn append_item(&mut self, item: Item) {
        self.channel.items.push(item);
    }

    /// Sorts items by publication date, newest first
    ///
    /// Dates are compared as plain strings. The sort is stable, so items with
    /// equal dates keep their relative order.
    pub fn sort_items_by_date(&mut self) {
        self.channel
            .items
            .sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    }

    /// Returns true if items are in descending publication date order
    pub fn is_sorted_by_date(&self) -> bool {
        self.channel
            .items
            .windows(2)
            .all(|pair| pair[0].pub_date >= pair[1].pub_date)
    }

    /// Removes and returns the item at `index`
    ///
    /// The document is left untouched when `index` is out of range.
    pub fn remove_item_at(&mut self, index: usize) -> FeedResult<Item> {
        let len = self.channel.items.len();
        if index >= len {
            return Err(FeedError::OutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len,
            });
        }
        Ok(self.channel.items.remove(index))
    }

    /// Ordered summaries of the current items
    pub fn item_titles(&self) -> Vec<ItemSummary> {
        self.channel
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| ItemSummary {
                index,
                title: item.title.clone(),
                pub_date: item.pub_date.clone(),
            })
            .collect()
    }
}
