//! Checkout confirmation types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use little_lemon_core::{MenuItemId, Price};

/// Message shown once an order has been placed.
pub const CONFIRMATION_MESSAGE: &str = "Your food has been purchased and will be delivered soon. Check your email for confirmation.";

/// A purchased line, frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub item_id: MenuItemId,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
}

/// Snapshot of a cart taken at checkout.
#[derive(Debug, Clone, Serialize)]
pub struct OrderConfirmation {
    /// Purchased lines in cart order.
    pub lines: Vec<OrderLine>,
    /// Sum of line quantities.
    pub item_count: u32,
    /// Sum of line totals.
    pub total: Price,
    /// When checkout happened.
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// The text shown to the customer after checkout.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        CONFIRMATION_MESSAGE
    }
}
