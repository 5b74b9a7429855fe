//! Onboarding and profile commands.

use std::io::{self, Write};

use clap::Args;

use little_lemon_app::models::UserProfile;
use little_lemon_app::profile::ProfileStore;
use little_lemon_app::storage::KeyValueStore;

use super::Result;

/// Field changes for `profile save`.
#[derive(Debug, Default, Args)]
pub struct ProfileEdits {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// Order status emails
    #[arg(long)]
    pub order_statuses: Option<bool>,
    /// Password change emails
    #[arg(long)]
    pub password_changes: Option<bool>,
    /// Special offer emails
    #[arg(long)]
    pub special_offers: Option<bool>,
    /// Newsletter
    #[arg(long)]
    pub newsletter: Option<bool>,
}

impl ProfileEdits {
    /// Apply the given fields to a draft, leaving the rest as they were.
    pub fn apply(self, draft: &mut UserProfile) {
        let replace = |field: &mut String, value: Option<String>| {
            if let Some(value) = value {
                *field = value;
            }
        };
        replace(&mut draft.first_name, self.first_name);
        replace(&mut draft.last_name, self.last_name);
        replace(&mut draft.email, self.email);
        replace(&mut draft.phone, self.phone);

        let notifications = &mut draft.notifications;
        notifications.order_statuses = self.order_statuses.unwrap_or(notifications.order_statuses);
        notifications.password_changes =
            self.password_changes.unwrap_or(notifications.password_changes);
        notifications.special_offers = self.special_offers.unwrap_or(notifications.special_offers);
        notifications.newsletter = self.newsletter.unwrap_or(notifications.newsletter);
    }
}

/// Register `name` and `email`, completing onboarding.
///
/// # Errors
///
/// Returns the validation error to show the user, or a storage error.
pub fn register<S: KeyValueStore>(
    out: &mut impl Write,
    profiles: &mut ProfileStore<S>,
    name: &str,
    email: &str,
) -> Result<()> {
    profiles.register(name, email)?;
    writeln!(out, "Welcome to Little Lemon, {name}!")?;
    Ok(())
}

/// Print the stored profile.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn show<S: KeyValueStore>(out: &mut impl Write, profiles: &ProfileStore<S>) -> Result<()> {
    if !profiles.is_onboarded() {
        writeln!(out, "Not registered yet. Run `ll-cli register` to get started.")?;
        return Ok(());
    }
    write_profile(out, &profiles.load())?;
    Ok(())
}

/// Load a draft, apply `edits`, and save it back.
///
/// # Errors
///
/// Returns the validation error to show the user, or a storage error.
pub fn save<S: KeyValueStore>(
    out: &mut impl Write,
    profiles: &mut ProfileStore<S>,
    edits: ProfileEdits,
) -> Result<()> {
    let mut draft = profiles.load();
    edits.apply(&mut draft);
    profiles.save(&draft)?;
    writeln!(out, "Changes saved!")?;
    Ok(())
}

/// Forget the stored profile.
///
/// # Errors
///
/// Returns an error if the profile cannot be cleared.
pub fn logout<S: KeyValueStore>(out: &mut impl Write, profiles: &mut ProfileStore<S>) -> Result<()> {
    profiles.logout()?;
    writeln!(out, "Logged out.")?;
    Ok(())
}

/// Render the personal information card.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_profile(out: &mut impl Write, profile: &UserProfile) -> io::Result<()> {
    let yes_no = |on: bool| if on { "on" } else { "off" };
    let notifications = &profile.notifications;

    writeln!(out, "Personal information")?;
    writeln!(out, "  First name:   {}", profile.first_name)?;
    writeln!(out, "  Last name:    {}", profile.last_name)?;
    writeln!(out, "  Email:        {}", profile.email)?;
    writeln!(out, "  Phone number: {}", profile.phone)?;
    writeln!(out, "Email notifications")?;
    writeln!(out, "  Order statuses:   {}", yes_no(notifications.order_statuses))?;
    writeln!(out, "  Password changes: {}", yes_no(notifications.password_changes))?;
    writeln!(out, "  Special offers:   {}", yes_no(notifications.special_offers))?;
    writeln!(out, "  Newsletter:       {}", yes_no(notifications.newsletter))
}
