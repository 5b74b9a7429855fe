//! JSON file backed key-value store.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::{KeyValueStore, StorageError};

/// A [`KeyValueStore`] persisted as a single JSON object on disk.
///
/// Values are cached in memory, so reads never touch the file. Each batch
/// is written to a sibling temp file and renamed over the original, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let values = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No profile file yet, starting empty");
                BTreeMap::new()
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        Ok(Self { path, values })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Write `values` to disk, then adopt them as the cached state.
    fn commit(&mut self, values: BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&values)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(self.io_error(e));
        }

        debug!(path = %self.path.display(), keys = values.len(), "Profile file written");
        self.values = values;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let mut values = self.values.clone();
        for (key, value) in entries {
            values.insert((*key).to_owned(), value.clone());
        }
        self.commit(values)
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<(), StorageError> {
        let mut values = self.values.clone();
        for key in keys {
            values.remove(*key);
        }
        self.commit(values)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::keys;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("profile.json")).unwrap();
        assert_eq!(store.get(keys::FIRST_NAME), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store
            .set_many(&[
                (keys::FIRST_NAME, "Tilly".to_owned()),
                (keys::EMAIL, "tilly@littlelemon.com".to_owned()),
            ])
            .unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get_or_default(keys::FIRST_NAME), "Tilly");
        assert_eq!(reopened.get_or_default(keys::EMAIL), "tilly@littlelemon.com");
    }

    #[test]
    fn test_remove_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set(keys::PHONE, "312-555-0100").unwrap();
        store.remove_many(&keys::IDENTITY).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get(keys::PHONE), None);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("profile.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set(keys::LAST_NAME, "Lemon").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn test_failed_write_keeps_cached_values() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("data");
        let mut store = JsonFileStore::open(parent.join("profile.json")).unwrap();

        // A regular file where the parent directory should be makes every commit fail.
        std::fs::write(&parent, "").unwrap();

        assert!(store.set(keys::FIRST_NAME, "Tilly").is_err());
        assert_eq!(store.get(keys::FIRST_NAME), None);
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        let mut store = JsonFileStore::open(&path).unwrap();

        // A non-empty directory at the target path cannot be replaced by a file.
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "").unwrap();

        assert!(matches!(
            store.set(keys::FIRST_NAME, "Tilly"),
            Err(StorageError::Io { .. })
        ));
        assert_eq!(store.get(keys::FIRST_NAME), None);
        assert!(!dir.path().join("profile.json.tmp").exists());
    }
}
