//! Domain models.
//!
//! Plain data carried between the stores and the front-end.

pub mod menu;
pub mod order;
pub mod profile;

pub use menu::MenuItem;
pub use order::{OrderConfirmation, OrderLine};
pub use profile::{NotificationPreferences, UserProfile};
