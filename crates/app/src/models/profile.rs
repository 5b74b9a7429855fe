//! User profile domain types.

use serde::{Deserialize, Serialize};

/// Identity fields kept on the device.
///
/// Every field is a plain string that reads as empty when nothing was
/// stored. A profile with a first name and an email counts as onboarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub notifications: NotificationPreferences,
}

impl UserProfile {
    /// Whether the fields required to leave onboarding are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.first_name.is_empty() && !self.email.is_empty()
    }
}

/// Which emails the user wants to receive. Everything is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub order_statuses: bool,
    pub password_changes: bool,
    pub special_offers: bool,
    pub newsletter: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            order_statuses: true,
            password_changes: true,
            special_offers: true,
            newsletter: true,
        }
    }
}
