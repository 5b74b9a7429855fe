//! Shopping cart.
//!
//! The cart maps menu items to positive quantities. Totals and counts are
//! computed from the lines on every read, so there is no cached value that
//! could fall out of date. Money arithmetic is checked: a total that would
//! overflow, or that mixes currencies, is an error rather than a wrong
//! number.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info, instrument};

use little_lemon_core::{CurrencyCode, MenuItemId, Price, PriceError};

use crate::models::{MenuItem, OrderConfirmation, OrderLine};

/// Error returned by [`Cart::checkout`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("your cart is empty")]
    EmptyCart,
    #[error("cannot total your cart: {0}")]
    Total(#[from] PriceError),
}

/// Error returned when a quantity falls outside the picker's range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("quantity must be between {min} and {max}, got {value}", min = QuantityPicker::MIN, max = QuantityPicker::MAX)]
pub struct QuantityError {
    pub value: i64,
}

/// One item in the cart with its quantity. The quantity is never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the product does not fit.
    pub fn line_total(&self) -> Result<Price, PriceError> {
        self.item.price.times(self.quantity)
    }
}

/// Quantities per menu item, keyed by item ID.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: BTreeMap<MenuItemId, CartLine>,
    currency: CurrencyCode,
}

impl Cart {
    /// An empty cart whose zero total is shown in `currency`.
    #[must_use]
    pub fn new(currency: CurrencyCode) -> Self {
        Self {
            lines: BTreeMap::new(),
            currency,
        }
    }

    /// Add `quantity` of `item`, accumulating onto any existing line.
    ///
    /// A negative quantity takes items away. A line whose quantity would
    /// drop to zero or below is removed, so the cart never holds an empty
    /// line.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub fn add(&mut self, item: &MenuItem, quantity: i32) {
        let current = self.quantity_of(item.id);
        let updated = i64::from(current) + i64::from(quantity);

        if updated <= 0 {
            if self.lines.remove(&item.id).is_some() {
                debug!("Line removed");
            }
            return;
        }

        let updated = u32::try_from(updated).unwrap_or(u32::MAX);
        self.lines
            .entry(item.id)
            .and_modify(|line| line.quantity = updated)
            .or_insert_with(|| CartLine {
                item: item.clone(),
                quantity: updated,
            });
        debug!(quantity = updated, "Line updated");
    }

    /// Drop the line for `id`, returning it if there was one.
    pub fn remove(&mut self, id: MenuItemId) -> Option<CartLine> {
        self.lines.remove(&id)
    }

    /// Sum of every line's price times quantity.
    ///
    /// An empty cart totals zero in the cart's currency; otherwise the
    /// currency is that of the lines.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::CurrencyMismatch`] if lines are priced in
    /// different currencies, or [`PriceError::Overflow`] if the sum does not
    /// fit.
    pub fn total(&self) -> Result<Price, PriceError> {
        let currency = self
            .lines
            .values()
            .next()
            .map_or(self.currency, |line| line.item.price.currency_code);

        self.lines
            .values()
            .try_fold(Price::zero(currency), |total, line| {
                total.checked_add(&line.line_total()?)
            })
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .values()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    /// The count for the cart badge, hidden (`None`) when the cart is empty.
    #[must_use]
    pub fn badge(&self) -> Option<u32> {
        Some(self.item_count()).filter(|count| *count > 0)
    }

    /// Quantity of `id` in the cart, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, id: MenuItemId) -> u32 {
        self.lines.get(&id).map_or(0, |line| line.quantity)
    }

    /// Lines ordered by item ID.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Place the order: snapshot the cart, then empty it.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy, or
    /// [`CheckoutError::Total`] if the cart cannot be totalled. The cart is
    /// left untouched in either case.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<OrderConfirmation, CheckoutError> {
        if self.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let total = self.total()?;
        let lines = self
            .lines()
            .map(|line| {
                Ok(OrderLine {
                    item_id: line.item.id,
                    title: line.item.title.clone(),
                    quantity: line.quantity,
                    unit_price: line.item.price,
                    line_total: line.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, PriceError>>()?;

        let confirmation = OrderConfirmation {
            lines,
            item_count: self.item_count(),
            total,
            placed_at: Utc::now(),
        };
        self.clear();

        info!(
            items = confirmation.item_count,
            total = %confirmation.total,
            "Order placed"
        );
        Ok(confirmation)
    }
}

/// The quantity stepper on an item's detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityPicker {
    value: u32,
}

impl QuantityPicker {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 10;

    /// A picker at the minimum quantity.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: Self::MIN }
    }

    /// A picker preset to `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is outside `MIN..=MAX`.
    pub fn with_value(value: i64) -> Result<Self, QuantityError> {
        u32::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(|value| Self { value })
            .ok_or(QuantityError { value })
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Step up, stopping at `MAX`.
    pub fn increment(&mut self) {
        self.value = (self.value + 1).min(Self::MAX);
    }

    /// Step down, stopping at `MIN`.
    pub fn decrement(&mut self) {
        self.value = self.value.saturating_sub(1).max(Self::MIN);
    }

    /// Add the picked quantity of `item` to `cart`.
    pub fn add_to(&self, cart: &mut Cart, item: &MenuItem) {
        // MAX is far below i32::MAX
        cart.add(item, i32::try_from(self.value).unwrap_or(i32::MAX));
    }
}

impl Default for QuantityPicker {
    fn default() -> Self {
        Self::new()
    }
}
