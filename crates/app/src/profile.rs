//! Profile store and onboarding gate.
//!
//! The profile lives in a [`KeyValueStore`]. Whether a first name and an
//! email are stored decides which top-level screen the app shows:
//!
//! ```text
//!              register() ok
//! Onboarding ----------------> Home
//!     ^                          |
//!     +--------- logout() -------+
//! ```
//!
//! Profile edits follow copy-on-write: [`ProfileStore::load`] hands out a
//! scratch copy, the screen edits it freely, and [`ProfileStore::save`] writes
//! it back in one batch. Discarding changes is just dropping the copy.

use tracing::{info, instrument, warn};

use little_lemon_core::{Email, EmailError};

use crate::models::{NotificationPreferences, UserProfile};
use crate::storage::{KeyValueStore, StorageError, keys};

/// Input rejected by registration or a profile save.
///
/// The messages are what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your name.")]
    EmptyName,
    #[error("Please enter a valid email.")]
    InvalidEmail(#[source] EmailError),
}

/// Error type for profile operations.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("could not store profile: {0}")]
    Storage(#[from] StorageError),
}

/// Top-level screen chosen by the onboarding gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// First-run flow collecting name and email.
    Onboarding,
    /// Menu, cart and profile.
    Home,
}

/// Check a name and email the way the onboarding form does.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] for an empty name, otherwise
/// [`ValidationError::InvalidEmail`] if the email is malformed.
pub fn validate_identity(name: &str, email: &str) -> Result<Email, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Email::parse(email).map_err(ValidationError::InvalidEmail)
}

/// Persisted user profile plus the onboarding state derived from it.
#[derive(Debug)]
pub struct ProfileStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether a first name and an email are stored.
    #[must_use]
    pub fn is_onboarded(&self) -> bool {
        !self.store.get_or_default(keys::FIRST_NAME).is_empty()
            && !self.store.get_or_default(keys::EMAIL).is_empty()
    }

    /// The screen to show for the stored profile.
    #[must_use]
    pub fn screen(&self) -> Screen {
        if self.is_onboarded() {
            Screen::Home
        } else {
            Screen::Onboarding
        }
    }

    /// Complete onboarding with a name and email.
    ///
    /// Nothing is stored unless both pass validation.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name or malformed email, or a
    /// storage error if the fields cannot be written.
    #[instrument(skip_all)]
    pub fn register(&mut self, name: &str, email: &str) -> Result<(), ProfileError> {
        let email = validate_identity(name, email).inspect_err(|e| {
            warn!(error = %e, "Registration rejected");
        })?;

        self.store.set_many(&[
            (keys::FIRST_NAME, name.to_owned()),
            (keys::EMAIL, email.as_str().to_owned()),
        ])?;

        info!(email_domain = email.domain(), "User registered");
        Ok(())
    }

    /// A scratch copy of the stored profile for editing.
    #[must_use]
    pub fn load(&self) -> UserProfile {
        UserProfile {
            first_name: self.store.get_or_default(keys::FIRST_NAME),
            last_name: self.store.get_or_default(keys::LAST_NAME),
            email: self.store.get_or_default(keys::EMAIL),
            phone: self.store.get_or_default(keys::PHONE),
            notifications: NotificationPreferences {
                order_statuses: self.flag(keys::NOTIFY_ORDER_STATUSES),
                password_changes: self.flag(keys::NOTIFY_PASSWORD_CHANGES),
                special_offers: self.flag(keys::NOTIFY_SPECIAL_OFFERS),
                newsletter: self.flag(keys::NOTIFY_NEWSLETTER),
            },
        }
    }

    /// Replace the stored profile with `profile` in one write.
    ///
    /// The first name and email are checked with the same rules as
    /// [`register`](Self::register), so a save can never leave the user
    /// half-onboarded. Last name and phone are free-form.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the first name or email is rejected,
    /// or a storage error if the write fails. Nothing is stored on error.
    #[instrument(skip_all)]
    pub fn save(&mut self, profile: &UserProfile) -> Result<(), ProfileError> {
        validate_identity(&profile.first_name, &profile.email).inspect_err(|e| {
            warn!(error = %e, "Profile save rejected");
        })?;

        let notifications = profile.notifications;
        self.store.set_many(&[
            (keys::FIRST_NAME, profile.first_name.clone()),
            (keys::LAST_NAME, profile.last_name.clone()),
            (keys::EMAIL, profile.email.clone()),
            (keys::PHONE, profile.phone.clone()),
            (keys::NOTIFY_ORDER_STATUSES, notifications.order_statuses.to_string()),
            (keys::NOTIFY_PASSWORD_CHANGES, notifications.password_changes.to_string()),
            (keys::NOTIFY_SPECIAL_OFFERS, notifications.special_offers.to_string()),
            (keys::NOTIFY_NEWSLETTER, notifications.newsletter.to_string()),
        ])?;

        info!("Profile saved");
        Ok(())
    }

    /// Forget the user. The next [`screen`](Self::screen) is onboarding.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored fields cannot be cleared.
    #[instrument(skip_all)]
    pub fn logout(&mut self) -> Result<(), ProfileError> {
        self.store.remove_many(&keys::ALL)?;
        info!("User logged out");
        Ok(())
    }

    /// The underlying key-value store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    // Opt-ins default to on; only an explicit "false" turns one off.
    fn flag(&self, key: &str) -> bool {
        self.store
            .get(key)
            .and_then(|value| value.parse::<bool>().ok())
            .unwrap_or(true)
    }
}
