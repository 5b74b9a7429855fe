//! Synchronous key-value persistence.
//!
//! Profile fields are stored as plain strings under fixed keys. Reads never
//! fail: a missing key reads as empty. Writes happen in batches so that a
//! profile save lands as a whole or not at all.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key names used for persisted profile fields.
pub mod keys {
    /// User's first name.
    pub const FIRST_NAME: &str = "firstName";

    /// User's last name.
    pub const LAST_NAME: &str = "lastName";

    /// User's email address.
    pub const EMAIL: &str = "email";

    /// User's phone number.
    pub const PHONE: &str = "phone";

    /// Order status email opt-in.
    pub const NOTIFY_ORDER_STATUSES: &str = "notifyOrderStatuses";

    /// Password change email opt-in.
    pub const NOTIFY_PASSWORD_CHANGES: &str = "notifyPasswordChanges";

    /// Special offers email opt-in.
    pub const NOTIFY_SPECIAL_OFFERS: &str = "notifySpecialOffers";

    /// Newsletter opt-in.
    pub const NOTIFY_NEWSLETTER: &str = "notifyNewsletter";

    /// The four identity fields.
    pub const IDENTITY: [&str; 4] = [FIRST_NAME, LAST_NAME, EMAIL, PHONE];

    /// Every key the profile store writes.
    pub const ALL: [&str; 8] = [
        FIRST_NAME,
        LAST_NAME,
        EMAIL,
        PHONE,
        NOTIFY_ORDER_STATUSES,
        NOTIFY_PASSWORD_CHANGES,
        NOTIFY_SPECIAL_OFFERS,
        NOTIFY_NEWSLETTER,
    ];
}

/// A synchronous string key-value store.
///
/// Implementations apply each batch atomically: after `set_many` or
/// `remove_many` returns `Ok`, every entry in the batch is visible; after it
/// returns `Err`, none is.
pub trait KeyValueStore {
    /// Get the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store every `(key, value)` pair as one write.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError>;

    /// Delete every key as one write. Missing keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove_many(&mut self, keys: &[&str]) -> Result<(), StorageError>;

    /// Get the value under `key`, or an empty string.
    fn get_or_default(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }

    /// Store a single value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_many(&[(key, value.to_owned())])
    }

    /// Delete a single key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.remove_many(&[key])
    }
}
