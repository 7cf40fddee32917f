//! File system persistence for feed documents
//!
//! Writes go through a temporary file in the target directory that is renamed
//! over the feed, so the file on disk always holds either the previous
//! complete document or the new one.

use crate::gateway::FeedStore;
use rsskeep_core::{FeedDocument, FeedError, FeedResult};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Feed store backed by a single file
#[derive(Debug, Clone)]
pub struct FileFeedStore {
    path: PathBuf,
    keep_backup: bool,
}

impl FileFeedStore {
    /// Creates a store for the feed file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            keep_backup: false,
        }
    }

    /// Copies the previous file to `<name>.backup` before each overwrite
    pub fn with_backup(mut self, keep_backup: bool) -> Self {
        self.keep_backup = keep_backup;
        self
    }

    /// Path of the feed file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path the previous version is copied to when backups are enabled
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".backup");
        self.path.with_file_name(name)
    }

    /// Directory holding the feed file
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Ensures a directory exists, creating it if necessary
    fn ensure_directory_exists(&self, dir: &Path) -> FeedResult<()> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| FeedError::io(dir, e))?;
            log::info!("Created feed directory: {}", dir.display());
        }
        Ok(())
    }

    /// Creates a backup of the current feed file
    fn backup_feed(&self) -> FeedResult<()> {
        let backup_path = self.backup_path();
        fs::copy(&self.path, &backup_path).map_err(|e| FeedError::io(&backup_path, e))?;
        log::debug!("Backed up feed to {}", backup_path.display());
        Ok(())
    }

    /// Writes content to a temporary file and atomically renames it
    fn write_atomic(&self, content: &[u8]) -> FeedResult<()> {
        let dir = self.parent_dir();
        let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| FeedError::io(dir, e))?;

        let temp_path = temp_file.path().to_path_buf();
        temp_file
            .write_all(content)
            .map_err(|e| FeedError::io(&temp_path, e))?;
        temp_file.flush().map_err(|e| FeedError::io(&temp_path, e))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| FeedError::io(&temp_path, e))?;

        self.apply_permissions(&temp_file)?;

        temp_file
            .persist(&self.path)
            .map_err(|e| FeedError::io(&self.path, e.error))?;
        Ok(())
    }

    /// Keeps the permissions of an existing feed, or makes a new one world-readable
    fn apply_permissions(&self, temp_file: &NamedTempFile) -> FeedResult<()> {
        let permissions = match fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => default_permissions(),
        };

        if let Some(permissions) = permissions {
            temp_file
                .as_file()
                .set_permissions(permissions)
                .map_err(|e| FeedError::io(temp_file.path(), e))?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

impl FeedStore for FileFeedStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> FeedResult<FeedDocument> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FeedError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(FeedError::io(&self.path, e)),
        };

        let contents = String::from_utf8(bytes).map_err(|e| {
            FeedError::malformed(format!("{} is not valid UTF-8: {}", self.path.display(), e))
        })?;

        let doc = rsskeep_feed_codec::decode(&contents)?;
        log::debug!(
            "Loaded feed from {} ({} items)",
            self.path.display(),
            doc.item_count()
        );
        Ok(doc)
    }

    fn store(&self, doc: &FeedDocument) -> FeedResult<()> {
        // Encode fully before touching the file system
        let bytes = rsskeep_feed_codec::FeedEncoder::encode_to_vec(doc)?;

        self.ensure_directory_exists(self.parent_dir())?;

        if self.keep_backup && self.path.exists() {
            self.backup_feed()?;
        }

        self.write_atomic(&bytes)?;

        log::info!(
            "Feed saved to {} ({} items)",
            self.path.display(),
            doc.item_count()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsskeep_core::Item;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let feed_path = temp_dir.path().join("rss.xml");
        (temp_dir, feed_path)
    }

    fn sample() -> FeedDocument {
        let mut doc = FeedDocument::new("T", "http://l", "D");
        doc.append_item(Item::new("A", "http://a", "2024-01-02", "x"));
        doc
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let (_temp_dir, feed_path) = setup_test_dir();
        let store = FileFeedStore::new(feed_path.clone());

        let err = store.load().unwrap_err();
        assert!(matches!(err, FeedError::NotFound { ref path } if *path == feed_path));
        assert!(!store.exists());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (_temp_dir, feed_path) = setup_test_dir();
        let store = FileFeedStore::new(feed_path);

        store.store(&sample()).expect("Should store feed");
        let loaded = store.load().expect("Should load feed");
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_store_replaces_previous_content() {
        let (_temp_dir, feed_path) = setup_test_dir();
        let store = FileFeedStore::new(feed_path.clone());

        store.store(&sample()).expect("Should store feed");
        let smaller = FeedDocument::new("T", "http://l", "D");
        store.store(&smaller).expect("Should store feed");

        let text = fs::read_to_string(&feed_path).expect("Should read file");
        assert!(!text.contains("<item>"));
        assert_eq!(store.load().expect("Should load"), smaller);
    }

    #[test]
    fn test_store_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let feed_path = temp_dir.path().join("public").join("rss.xml");
        let store = FileFeedStore::new(feed_path.clone());

        store.store(&sample()).expect("Should create directory and save");
        assert!(feed_path.exists());
    }

    #[test]
    fn test_backup_created_on_overwrite() {
        let (_temp_dir, feed_path) = setup_test_dir();
        let store = FileFeedStore::new(feed_path).with_backup(true);

        store.store(&sample()).expect("Should store feed");
        assert!(!store.backup_path().exists());

        store
            .store(&FeedDocument::new("T", "http://l", "D"))
            .expect("Should store feed again");

        let backup = fs::read_to_string(store.backup_path()).expect("Backup should exist");
        assert_eq!(
            rsskeep_feed_codec::decode(&backup).expect("Backup decodes"),
            sample()
        );
    }

    #[test]
    fn test_backup_path_appends_suffix() {
        let store = FileFeedStore::new("/srv/feed/rss.xml");
        assert_eq!(store.backup_path(), PathBuf::from("/srv/feed/rss.xml.backup"));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let (_temp_dir, feed_path) = setup_test_dir();
        fs::write(&feed_path, [0xff, 0xfe, 0x00]).expect("Should write file");

        let err = FileFeedStore::new(feed_path).load().unwrap_err();
        assert!(matches!(err, FeedError::MalformedDocument { .. }));
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let (temp_dir, feed_path) = setup_test_dir();
        let store = FileFeedStore::new(feed_path);
        store.store(&sample()).expect("Should store feed");
        store.store(&sample()).expect("Should store feed");

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .expect("Should list dir")
            .filter_map(Result::ok)
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_feed_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp_dir, feed_path) = setup_test_dir();
        FileFeedStore::new(feed_path.clone())
            .store(&sample())
            .expect("Should store feed");

        let mode = fs::metadata(&feed_path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
