//! In-process key-value store.

use std::collections::BTreeMap;

use super::{KeyValueStore, StorageError};

/// A [`KeyValueStore`] that lives only as long as the process.
///
/// Used by tests and by sessions that should not touch the disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.values.insert((*key).to_owned(), value.clone());
        }
        Ok(())
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.values.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::keys;

    #[test]
    fn test_missing_key_reads_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.get(keys::EMAIL), None);
        assert_eq!(store.get_or_default(keys::EMAIL), "");
    }

    #[test]
    fn test_set_and_remove() {
        let mut store = MemoryStore::new();
        store.set(keys::FIRST_NAME, "Tilly").unwrap();
        assert_eq!(store.get(keys::FIRST_NAME).as_deref(), Some("Tilly"));

        store.set(keys::FIRST_NAME, "Adrian").unwrap();
        assert_eq!(store.get_or_default(keys::FIRST_NAME), "Adrian");
        assert_eq!(store.len(), 1);

        store.remove(keys::FIRST_NAME).unwrap();
        assert!(store.is_empty());
        // Removing again is a no-op
        store.remove(keys::FIRST_NAME).unwrap();
    }

    #[test]
    fn test_batches() {
        let mut store = MemoryStore::new();
        store
            .set_many(&[
                (keys::FIRST_NAME, "Tilly".to_owned()),
                (keys::EMAIL, "tilly@littlelemon.com".to_owned()),
            ])
            .unwrap();
        assert_eq!(store.len(), 2);

        store.remove_many(&keys::IDENTITY).unwrap();
        assert!(store.is_empty());
    }
}
