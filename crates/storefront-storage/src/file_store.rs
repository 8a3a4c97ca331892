//! # File Store
//!
//! One JSON file per storage key under a data directory.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set("storefront-cart", json)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <root>/storefront-cart.json.tmp   ← write + fsync                     │
//! │       │                                                                 │
//! │       ▼  rename (atomic on the same file system)                       │
//! │  <root>/storefront-cart.json                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fsync(<root>)                      ← unix only                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A crash mid-write leaves either the old file or the new one, never a
//! truncated record.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use storefront_core::{KeyValueStore, StorageResult};
use tracing::{debug, info};

use crate::error::{FileStoreError, FileStoreResult};

const EXTENSION: &str = "json";

/// Platform data directory for the storefront.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.storefront.storefront`
/// - **Windows**: `%APPDATA%\storefront\storefront\data`
/// - **Linux**: `~/.local/share/storefront`
pub fn default_data_dir() -> FileStoreResult<PathBuf> {
    ProjectDirs::from("com", "storefront", "storefront")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(FileStoreError::NoDataDir)
}

/// File-backed [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> FileStoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| FileStoreError::CreateDir {
            path: root.clone(),
            source,
        })?;
        info!(root = %root.display(), "opened file store");
        Ok(FileStore { root })
    }

    /// Opens a store in the platform data directory.
    pub fn open_default() -> FileStoreResult<Self> {
        Self::open(default_data_dir()?)
    }

    /// The directory holding the records.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds `key`.
    ///
    /// Characters outside `[A-Za-z0-9._-]` become `_`, so a key can never
    /// escape the root directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if name.is_empty() {
            name.push('_');
        }
        name.push('.');
        name.push_str(EXTENSION);
        self.root.join(name)
    }

    fn read(&self, key: &str) -> FileStoreResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(FileStoreError::io(path, err)),
        }
    }

    fn write(&self, key: &str, value: &str) -> FileStoreResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension(format!("{EXTENSION}.tmp"));

        write_and_sync(&tmp, value.as_bytes()).map_err(|err| FileStoreError::io(&tmp, err))?;
        if let Err(err) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(FileStoreError::io(&path, err));
        }
        sync_dir(&self.root).map_err(|err| FileStoreError::io(&self.root, err))?;

        debug!(path = %path.display(), bytes = value.len(), "wrote record");
        Ok(())
    }

    fn delete(&self, key: &str) -> FileStoreResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "deleted record");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(FileStoreError::io(path, err)),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.read(key).map_err(|err| err.into_read(key))
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.write(key, value).map_err(|err| err.into_write(key))
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.delete(key).map_err(|err| err.into_remove(key))
    }
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{Cart, CartDiagnostic, LoadStatus, StorageError, DEFAULT_CART_KEY};

    fn store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("data")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_creates_directory() {
        let (_dir, store) = store();
        assert!(store.root().is_dir());
    }

    #[test]
    fn test_missing_key_reads_as_none() {
        let (_dir, store) = store();
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let (_dir, mut store) = store();

        store.set("cart", r#"{"items":[]}"#).unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some(r#"{"items":[]}"#));
        assert!(store.path_for("cart").is_file());

        store.remove("cart").unwrap();
        assert!(!store.path_for("cart").exists());
        assert_eq!(store.get("cart").unwrap(), None);
        store.remove("cart").unwrap();
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let (_dir, mut store) = store();
        store.set("cart", "one").unwrap();
        store.set("cart", "two").unwrap();

        let names: Vec<_> = fs::read_dir(store.root())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["cart.json".to_string()]);
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_keys_cannot_escape_root() {
        let (_dir, store) = store();
        let path = store.path_for("../../etc/passwd");
        assert_eq!(path.parent(), Some(store.root()));
        assert_eq!(path.file_name().unwrap(), ".._.._etc_passwd.json");
        assert_eq!(store.path_for("").file_name().unwrap(), "_.json");
    }

    #[test]
    fn test_unreadable_record_is_a_read_error() {
        let (_dir, store) = store();
        fs::create_dir(store.path_for("cart")).unwrap();

        assert!(matches!(store.get("cart"), Err(StorageError::Read { .. })));
    }

    #[test]
    fn test_cart_survives_reopen() {
        let (dir, store) = store();
        {
            let mut cart = Cart::load(store);
            cart.add_item("spray-100ml", 2, 19.99).unwrap();
        }

        let reopened = FileStore::open(dir.path().join("data")).unwrap();
        let stored = fs::read_to_string(reopened.path_for(DEFAULT_CART_KEY)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(json["items"][0]["price"], 19.99);

        let cart = Cart::load(reopened);
        assert_eq!(cart.load_status(), LoadStatus::Restored { items: 1 });
        assert_eq!(cart.total().cents(), 3998);
    }

    #[test]
    fn test_corrupt_file_recovers_empty_cart() {
        let (_dir, mut store) = store();
        store.set(DEFAULT_CART_KEY, "{ truncated").unwrap();

        let cart = Cart::load(store);
        assert!(cart.is_empty());
        assert!(matches!(cart.diagnostics(), [CartDiagnostic::CorruptState(_)]));
    }

    #[test]
    fn test_clear_deletes_file() {
        let (_dir, store) = store();
        let mut cart = Cart::load(store);
        cart.add_item("spray-100ml", 1, 19.99).unwrap();
        cart.clear();

        let store = cart.into_store();
        assert!(!store.path_for(DEFAULT_CART_KEY).exists());
    }
}
