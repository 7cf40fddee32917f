//! Load-modify-store feed operations

use crate::gateway::FeedStore;
use rsskeep_core::{
    ChannelFields, FeedDocument, FeedError, FeedPolicy, FeedResult, Item, ItemFields, ItemSummary,
};

/// Main feed API
///
/// Each operation loads the whole document, changes it in memory and writes
/// it back in one step. Nothing is cached between calls.
pub struct FeedService<S: FeedStore> {
    store: S,
    policy: FeedPolicy,
}

impl<S: FeedStore> FeedService<S> {
    /// Creates a service over `store` that follows `policy`
    pub fn new(store: S, policy: FeedPolicy) -> Self {
        Self { store, policy }
    }

    /// Returns the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the active policy
    pub fn policy(&self) -> &FeedPolicy {
        &self.policy
    }

    /// Creates a new feed with an empty channel
    ///
    /// Refuses to replace an existing feed unless the policy allows it.
    pub fn initialize(&self, fields: ChannelFields) -> FeedResult<FeedDocument> {
        self.ensure_can_initialize()?;

        let doc = FeedDocument::from_policy(fields, &self.policy);
        self.store.store(&doc)?;

        log::info!(
            "Initialized feed '{}' at {}",
            doc.channel().title(),
            self.store.location().display()
        );
        Ok(doc)
    }

    /// Fails with `AlreadyExists` when `initialize` would be refused
    pub fn ensure_can_initialize(&self) -> FeedResult<()> {
        if self.store.exists() && !self.policy.overwrite_on_init {
            return Err(FeedError::AlreadyExists {
                path: self.store.location().to_path_buf(),
            });
        }
        Ok(())
    }

    /// Loads the current feed
    pub fn load(&self) -> FeedResult<FeedDocument> {
        self.store.load()
    }

    /// Adds an item and re-sorts the feed by publication date
    pub fn add(&self, fields: ItemFields) -> FeedResult<FeedDocument> {
        let item = Item::from_fields(fields, &self.policy);
        let sort_on_add = self.policy.sort_on_add;

        let (doc, ()) = self.update(|doc| {
            log::debug!("Adding item '{}' dated '{}'", item.title, item.pub_date);
            doc.append_item(item);
            if sort_on_add {
                doc.sort_items_by_date();
            }
            Ok(())
        })?;
        Ok(doc)
    }

    /// Ordered titles of the current items
    pub fn items(&self) -> FeedResult<Vec<ItemSummary>> {
        Ok(self.store.load()?.item_titles())
    }

    /// Removes the item at `index` and returns it
    ///
    /// An out-of-range index fails before anything is written.
    pub fn remove(&self, index: usize) -> FeedResult<Item> {
        let (_, removed) = self.update(|doc| doc.remove_item_at(index))?;
        log::debug!("Removed item '{}' at index {}", removed.title, index);
        Ok(removed)
    }

    /// Loads the feed, applies `update_fn` and saves the result
    ///
    /// Nothing is written when `update_fn` fails.
    pub fn update<T, F>(&self, update_fn: F) -> FeedResult<(FeedDocument, T)>
    where
        F: FnOnce(&mut FeedDocument) -> FeedResult<T>,
    {
        let mut doc = self.store.load()?;
        let output = update_fn(&mut doc)?;
        self.store.store(&doc)?;
        Ok((doc, output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryFeedStore;

    fn channel() -> ChannelFields {
        ChannelFields {
            title: "T".to_string(),
            link: "http://l".to_string(),
            description: "D".to_string(),
        }
    }

    fn item(title: &str, date: &str) -> ItemFields {
        ItemFields {
            title: title.to_string(),
            link: format!("http://{}", title.to_lowercase()),
            pub_date: date.to_string(),
            description: "d".to_string(),
        }
    }

    #[test]
    fn test_initialize_writes_empty_feed() {
        let service = FeedService::new(MemoryFeedStore::new(), FeedPolicy::default());
        let doc = service.initialize(channel()).expect("Should initialize");
        assert!(doc.is_empty());
        assert_eq!(service.load().expect("Should load"), doc);
    }

    #[test]
    fn test_initialize_refuses_existing_feed() {
        let service = FeedService::new(MemoryFeedStore::new(), FeedPolicy::default());
        service.initialize(channel()).expect("Should initialize");
        service.add(item("A", "1")).expect("Should add");

        assert!(matches!(
            service.ensure_can_initialize(),
            Err(FeedError::AlreadyExists { .. })
        ));
        let err = service.initialize(channel()).unwrap_err();
        assert!(matches!(err, FeedError::AlreadyExists { .. }));
        assert_eq!(service.load().expect("Should load").item_count(), 1);
    }

    #[test]
    fn test_initialize_overwrites_when_allowed() {
        let policy = FeedPolicy::default().with_overwrite(true);
        let service = FeedService::new(MemoryFeedStore::new(), policy);
        service.initialize(channel()).expect("Should initialize");
        service.add(item("A", "1")).expect("Should add");
        assert!(service.ensure_can_initialize().is_ok());

        let doc = service.initialize(channel()).expect("Should overwrite");
        assert!(doc.is_empty());
        assert!(service.load().expect("Should load").is_empty());
    }

    #[test]
    fn test_add_without_sort_keeps_insertion_order() {
        let policy = FeedPolicy {
            sort_on_add: false,
            ..FeedPolicy::default()
        };
        let service = FeedService::new(MemoryFeedStore::new(), policy);
        service.initialize(channel()).expect("Should initialize");
        service.add(item("Old", "2020")).expect("Should add");
        service.add(item("New", "2024")).expect("Should add");

        let titles: Vec<_> = service
            .items()
            .expect("Should list")
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Old", "New"]);
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let service = FeedService::new(MemoryFeedStore::new(), FeedPolicy::default());
        service.initialize(channel()).expect("Should initialize");
        let before = service.store().contents();

        let result: FeedResult<(FeedDocument, ())> = service.update(|doc| {
            doc.append_item(Item::new("x", "y", "z", "w"));
            Err(FeedError::malformed("abort"))
        });
        assert!(result.is_err());
        assert_eq!(service.store().contents(), before);
    }
}
