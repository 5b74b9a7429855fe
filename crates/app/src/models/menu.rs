//! Menu item domain type.

use serde::{Deserialize, Serialize};

use little_lemon_core::{Category, MenuItemId, Price};

/// A dish or drink on the menu.
///
/// Items are built once when the catalog loads and never change afterwards.
/// IDs are unique within a catalog; equality compares every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique item ID within the catalog.
    pub id: MenuItemId,
    /// Dish name, e.g. "Greek Salad".
    pub title: String,
    /// One-line description shown under the title.
    pub description: String,
    /// Validated unit price.
    pub price: Price,
    /// Name of the image asset for the dish.
    pub image: String,
    /// Menu grouping.
    pub category: Category,
}

impl MenuItem {
    /// Whether the title contains `search`, ignoring case.
    ///
    /// An empty search matches every item.
    #[must_use]
    pub fn title_matches(&self, search: &str) -> bool {
        search.is_empty() || self.title.to_lowercase().contains(&search.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use little_lemon_core::CurrencyCode;

    use super::*;

    fn salad() -> MenuItem {
        MenuItem {
            id: MenuItemId::new(1),
            title: "Greek Salad".to_owned(),
            description: "Crispy lettuce and feta.".to_owned(),
            price: Price::from_cents(1299, CurrencyCode::USD),
            image: "Greek salad".to_owned(),
            category: Category::Starters,
        }
    }

    #[test]
    fn test_title_matches() {
        let item = salad();
        assert!(item.title_matches(""));
        assert!(item.title_matches("greek"));
        assert!(item.title_matches("SALAD"));
        assert!(!item.title_matches("feta"));
    }

    #[test]
    fn test_equality_compares_every_field() {
        let repriced = MenuItem {
            price: Price::from_cents(1399, CurrencyCode::USD),
            ..salad()
        };
        assert_eq!(salad(), salad());
        assert_ne!(salad(), repriced);
    }
}
