//! JSON key-value state persistence
//!
//! All durable state lives under three fixed keys, each stored as one
//! JSON document in its own file. Writes always replace the whole value
//! for a key; there are no partial updates.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::{Result, StorageError};

/// Key holding the authenticated user, if any
pub const USER_KEY: &str = "socialbox_user";
/// Key holding the list of connected platforms
pub const PLATFORMS_KEY: &str = "socialbox_platforms";
/// Key holding the post collection
pub const POSTS_KEY: &str = "socialbox_posts";

/// File-backed JSON key-value store
///
/// Each key maps to `<dir>/<key>.json`. A missing file means the key is
/// absent; a corrupt file is treated as absent after logging a warning,
/// so a bad value never poisons startup.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Open a store rooted at the given directory, creating it if needed
    pub fn with_dir(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir).map_err(StorageError::Io)?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read and deserialize the value stored under `key`
    ///
    /// Returns `None` when the key has never been written. A file that
    /// fails to parse is logged and reported as absent rather than
    /// propagated as an error.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(StorageError::Io)?;
        match serde_json::from_str::<T>(&content) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt state file, treating as absent");
                Ok(None)
            }
        }
    }

    /// Serialize `value` and overwrite whatever is stored under `key`
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.key_path(key);
        let content = serde_json::to_string_pretty(value).map_err(StorageError::Serialize)?;
        std::fs::write(&path, content).map_err(StorageError::Io)?;
        Ok(())
    }

    /// Remove the value stored under `key`. Missing keys are a no-op.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            std::fs::remove_file(&path).map_err(StorageError::Io)?;
        }
        Ok(())
    }

    /// Whether a value exists under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.key_path(key).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlatformKind, Post, PostStatus};
    use tempfile::TempDir;

    fn test_store() -> (TempDir, StateStore) {
        let dir = TempDir::new().unwrap();
        let store = StateStore::with_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_get_missing_key() {
        let (_dir, store) = test_store();
        let value: Option<Vec<Post>> = store.get(POSTS_KEY).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_put_then_get() {
        let (_dir, store) = test_store();
        let posts = vec![Post::new(
            "Hello".to_string(),
            vec![PlatformKind::Twitter],
            PostStatus::Published,
        )];

        store.put(POSTS_KEY, &posts).unwrap();
        let loaded: Vec<Post> = store.get(POSTS_KEY).unwrap().unwrap();
        assert_eq!(loaded, posts);
    }

    #[test]
    fn test_put_overwrites_whole_value() {
        let (_dir, store) = test_store();
        store.put(POSTS_KEY, &vec!["one", "two", "three"]).unwrap();
        store.put(POSTS_KEY, &vec!["replacement"]).unwrap();

        let loaded: Vec<String> = store.get(POSTS_KEY).unwrap().unwrap();
        assert_eq!(loaded, vec!["replacement"]);
    }

    #[test]
    fn test_remove() {
        let (_dir, store) = test_store();
        store.put(USER_KEY, &"demo").unwrap();
        assert!(store.contains(USER_KEY));

        store.remove(USER_KEY).unwrap();
        assert!(!store.contains(USER_KEY));

        // Removing an absent key is fine
        store.remove(USER_KEY).unwrap();
    }

    #[test]
    fn test_corrupt_file_treated_as_absent() {
        let (dir, store) = test_store();
        std::fs::write(dir.path().join(format!("{}.json", USER_KEY)), "not json {{{").unwrap();

        let value: Option<String> = store.get(USER_KEY).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_keys_are_isolated_files() {
        let (dir, store) = test_store();
        store.put(USER_KEY, &"u").unwrap();
        store.put(PLATFORMS_KEY, &Vec::<String>::new()).unwrap();

        assert!(dir.path().join("socialbox_user.json").exists());
        assert!(dir.path().join("socialbox_platforms.json").exists());
        assert!(!dir.path().join("socialbox_posts.json").exists());
    }

    #[test]
    fn test_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = StateStore::with_dir(dir.path().to_path_buf()).unwrap();
            store.put(USER_KEY, &"persisted").unwrap();
        }
        {
            let store = StateStore::with_dir(dir.path().to_path_buf()).unwrap();
            let value: String = store.get(USER_KEY).unwrap().unwrap();
            assert_eq!(value, "persisted");
        }
    }
}
