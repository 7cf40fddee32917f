//! End-to-end feed operations against a real file

use rsskeep_core::{ChannelFields, FeedError, FeedPolicy, ItemFields};
use rsskeep_store::{FeedService, FeedStore, FileFeedStore, MemoryFeedStore};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn setup_service() -> (TempDir, PathBuf, FeedService<FileFeedStore>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let feed_path = temp_dir.path().join("rss.xml");
    let service = FeedService::new(FileFeedStore::new(feed_path.clone()), FeedPolicy::default());
    (temp_dir, feed_path, service)
}

fn channel(title: &str, link: &str, description: &str) -> ChannelFields {
    ChannelFields {
        title: title.to_string(),
        link: link.to_string(),
        description: description.to_string(),
    }
}

fn item(title: &str, link: &str, pub_date: &str, description: &str) -> ItemFields {
    ItemFields {
        title: title.to_string(),
        link: link.to_string(),
        pub_date: pub_date.to_string(),
        description: description.to_string(),
    }
}

fn stored_titles(service: &FeedService<FileFeedStore>) -> Vec<String> {
    service
        .load()
        .expect("Should load")
        .channel()
        .items()
        .iter()
        .map(|i| i.title.clone())
        .collect()
}

#[test]
fn test_initialize_add_remove_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, _feed_path, service) = setup_service();

    service.initialize(channel("T", "http://l", "D"))?;
    assert_eq!(service.load()?.item_count(), 0);

    service.add(item("A", "http://a", "2024-01-02", "x"))?;
    assert_eq!(stored_titles(&service), vec!["A"]);

    service.add(item("B", "http://b", "2024-03-01", "y"))?;
    assert_eq!(stored_titles(&service), vec!["B", "A"]);

    let removed = service.remove(0)?;
    assert_eq!(removed.title, "B");
    assert_eq!(stored_titles(&service), vec!["A"]);

    Ok(())
}

#[test]
fn test_removing_last_item_leaves_wellformed_feed() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, feed_path, service) = setup_service();

    service.initialize(channel("T", "http://l", "D"))?;
    service.add(item("A", "http://a", "2024-01-02", "x"))?;
    service.remove(0)?;

    let doc = service.load()?;
    assert!(doc.is_empty());
    assert_eq!(doc.channel().title(), "T");

    let text = fs::read_to_string(&feed_path)?;
    assert!(text.contains("<channel>"));
    assert!(!text.contains("<item>"));
    Ok(())
}

#[test]
fn test_add_keeps_items_sorted() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, _feed_path, service) = setup_service();
    service.initialize(channel("T", "http://l", "D"))?;

    for (n, date) in ["2024-02-01", "2023-01-01", "2025-07-04", "2024-02-01", "2024-12-31"]
        .iter()
        .enumerate()
    {
        let doc = service.add(item(&format!("item{}", n), "http://x", date, "d"))?;
        assert!(doc.is_sorted_by_date());
    }

    let doc = service.load()?;
    let dates: Vec<_> = doc.channel().items().iter().map(|i| i.pub_date.as_str()).collect();
    assert_eq!(
        dates,
        vec!["2025-07-04", "2024-12-31", "2024-02-01", "2024-02-01", "2023-01-01"]
    );
    // equal dates keep arrival order
    assert_eq!(doc.channel().items()[2].title, "item0");
    assert_eq!(doc.channel().items()[3].title, "item3");
    Ok(())
}

#[test]
fn test_added_item_guid_equals_link() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, feed_path, service) = setup_service();
    service.initialize(channel("T", "http://l", "D"))?;
    service.add(item("A", "http://example.com/a?x=1&y=2", "2024-01-02", "x"))?;

    let doc = service.load()?;
    let stored = &doc.channel().items()[0];
    assert_eq!(stored.guid(), Some(stored.link.as_str()));

    let text = fs::read_to_string(&feed_path)?;
    assert!(text.contains("<guid>http://example.com/a?x=1&amp;y=2</guid>"));
    Ok(())
}

#[test]
fn test_out_of_range_remove_leaves_file_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, feed_path, service) = setup_service();
    service.initialize(channel("T", "http://l", "D"))?;
    service.add(item("A", "http://a", "2024-01-02", "x"))?;
    let before = fs::read(&feed_path)?;

    let err = service.remove(1).unwrap_err();
    assert!(matches!(err, FeedError::OutOfRange { index: 1, len: 1 }));
    assert_eq!(fs::read(&feed_path)?, before);
    Ok(())
}

#[test]
fn test_add_and_remove_require_existing_feed() {
    let (_temp_dir, feed_path, service) = setup_service();

    let err = service.add(item("A", "http://a", "1", "x")).unwrap_err();
    assert!(matches!(err, FeedError::NotFound { ref path } if *path == feed_path));

    let err = service.remove(0).unwrap_err();
    assert!(matches!(err, FeedError::NotFound { .. }));

    assert!(!feed_path.exists());
}

#[test]
fn test_initialize_refuses_to_overwrite_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, feed_path, service) = setup_service();
    service.initialize(channel("T", "http://l", "D"))?;
    service.add(item("A", "http://a", "1", "x"))?;
    let before = fs::read(&feed_path)?;

    let err = service.initialize(channel("Other", "http://o", "O")).unwrap_err();
    assert!(matches!(err, FeedError::AlreadyExists { .. }));
    assert_eq!(fs::read(&feed_path)?, before);
    Ok(())
}

#[test]
fn test_malformed_file_is_reported_and_kept() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, feed_path, service) = setup_service();
    fs::write(&feed_path, "<rss version=\"2.0\"><channel><title>T</title>")?;

    let err = service.add(item("A", "http://a", "1", "x")).unwrap_err();
    assert!(matches!(err, FeedError::MalformedDocument { .. }));
    assert_eq!(
        fs::read_to_string(&feed_path)?,
        "<rss version=\"2.0\"><channel><title>T</title>"
    );
    Ok(())
}

#[test]
fn test_each_call_rereads_the_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, feed_path, service) = setup_service();
    service.initialize(channel("T", "http://l", "D"))?;

    // Another process edits the file between invocations
    let other = FeedService::new(FileFeedStore::new(feed_path), FeedPolicy::default());
    other.add(item("External", "http://e", "2024-01-01", "e"))?;

    service.add(item("Local", "http://l1", "2023-01-01", "l"))?;
    assert_eq!(stored_titles(&service), vec!["External", "Local"]);
    Ok(())
}

#[test]
fn test_io_failure_surfaces_and_keeps_prior_state() -> Result<(), Box<dyn std::error::Error>> {
    let seed = FeedService::new(MemoryFeedStore::new(), FeedPolicy::default());
    seed.initialize(channel("T", "http://l", "D"))?;
    let bytes = seed.store().contents().expect("seeded");

    let store = MemoryFeedStore::with_contents(bytes.clone()).read_only();
    let service = FeedService::new(store, FeedPolicy::default());

    let err = service.add(item("A", "http://a", "1", "x")).unwrap_err();
    assert!(matches!(err, FeedError::Io { .. }));
    assert_eq!(service.store().contents(), Some(bytes));
    assert!(service.store().exists());
    Ok(())
}

#[test]
fn test_policy_without_namespace_or_guid() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let feed_path = temp_dir.path().join("plain.xml");
    let policy = FeedPolicy {
        include_namespace: false,
        include_guid: false,
        ..FeedPolicy::default()
    };
    let service = FeedService::new(FileFeedStore::new(feed_path.clone()), policy);

    service.initialize(channel("T", "http://l", "D"))?;
    service.add(item("A", "http://a", "1", "x"))?;

    let text = fs::read_to_string(&feed_path)?;
    assert!(!text.contains("xmlns"));
    assert!(!text.contains("<guid>"));
    assert!(service.load()?.channel().items()[0].guid().is_none());
    Ok(())
}

#[test]
fn test_unencodable_input_fails_before_writing() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, feed_path, service) = setup_service();

    let err = service.initialize(channel("T\u{1}", "http://l", "D")).unwrap_err();
    assert!(matches!(err, FeedError::Encode { .. }));
    assert!(!feed_path.exists());

    service.initialize(channel("T", "http://l", "D"))?;
    let before = fs::read(&feed_path)?;
    let err = service
        .add(item("A", "http://a", "2024-01-02", "form\u{c}feed"))
        .unwrap_err();
    assert!(matches!(err, FeedError::Encode { .. }));
    assert_eq!(fs::read(&feed_path)?, before);
    Ok(())
}
