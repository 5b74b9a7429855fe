//! Menu catalog and filtering.
//!
//! The catalog is built once at startup, either from the built-in demo menu
//! or from a YAML menu file, and is read-only afterwards. Prices and
//! categories are validated while loading so that nothing downstream has to
//! deal with malformed menu data.
//!
//! # Menu file format
//!
//! ```yaml
//! items:
//!   - id: 1
//!     title: Greek Salad
//!     description: Crispy lettuce and feta.
//!     price: "$12.99"
//!     image: Greek salad
//!     category: starters
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, instrument};

use little_lemon_core::{Category, CategoryError, CurrencyCode, MenuItemId, Price, PriceError};

use crate::models::MenuItem;

/// Errors raised while building a catalog from menu data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot read menu file {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid menu file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("menu item {id} appears more than once")]
    DuplicateId { id: MenuItemId },
    #[error("menu item {title:?} has an invalid price: {source}")]
    InvalidPrice {
        title: String,
        #[source]
        source: PriceError,
    },
    #[error("menu item {title:?} has an invalid category: {source}")]
    InvalidCategory {
        title: String,
        #[source]
        source: CategoryError,
    },
    #[error("menu item {title:?} is priced in {found}, the rest of the menu in {expected}")]
    MixedCurrency {
        title: String,
        expected: CurrencyCode,
        found: CurrencyCode,
    },
}

/// The restaurant's menu.
#[derive(Debug, Clone, Default)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    /// Build a catalog from already-validated items.
    ///
    /// # Errors
    ///
    /// Returns an error if two items share an ID or the items are priced in
    /// more than one currency.
    pub fn new(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        let mut currency = None;

        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId { id: item.id });
            }
            match currency {
                None => currency = Some(item.price.currency_code),
                Some(expected) if expected != item.price.currency_code => {
                    return Err(CatalogError::MixedCurrency {
                        title: item.title.clone(),
                        expected,
                        found: item.price.currency_code,
                    });
                }
                Some(_) => {}
            }
        }

        Ok(Self { items })
    }

    /// The five-dish demo menu.
    #[must_use]
    pub fn demo() -> Self {
        let item = |id, title: &str, description: &str, cents, image: &str, category| MenuItem {
            id: MenuItemId::new(id),
            title: title.to_owned(),
            description: description.to_owned(),
            price: Price::from_cents(cents, CurrencyCode::USD),
            image: image.to_owned(),
            category,
        };

        Self {
            items: vec![
                item(1, "Greek Salad", "Crispy lettuce and feta.", 1299, "Greek salad", Category::Starters),
                item(2, "Bruschetta", "Grilled bread with tomatoes.", 799, "Bruschetta", Category::Starters),
                item(3, "Grilled Fish", "Catch of the day.", 2000, "Grilled fish", Category::Mains),
                item(4, "Pasta", "Penne with tomato sauce.", 1899, "Pasta", Category::Mains),
                item(5, "Lemon Dessert", "Ricotta lemon cake.", 699, "Lemon dessert", Category::Desserts),
            ],
        }
    }

    /// Parse a catalog from YAML menu data.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or any item fails
    /// validation.
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let file: MenuFile = serde_yaml::from_str(content)?;
        let items = file
            .items
            .into_iter()
            .map(MenuEntry::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(items)
    }

    /// Load a catalog from a YAML menu file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are
    /// invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_yaml_str(&content)?;
        info!(items = catalog.len(), "Menu loaded");
        Ok(catalog)
    }

    /// All items in menu order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Look up an item by ID.
    #[must_use]
    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items passing `menu_filter`, in menu order.
    #[must_use]
    pub fn filter(&self, menu_filter: &MenuFilter) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| menu_filter.matches(item))
            .collect()
    }

    /// Currency the menu is priced in, if it has any items.
    #[must_use]
    pub fn currency(&self) -> Option<CurrencyCode> {
        self.items.first().map(|item| item.price.currency_code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The home screen's current category chip and search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    /// Selected category; `None` is "All".
    pub category: Option<Category>,
    /// Search text matched against item titles.
    pub search: String,
}

impl MenuFilter {
    /// A filter that lets every item through.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Whether `item` passes both the category and the search predicate.
    #[must_use]
    pub fn matches(&self, item: &MenuItem) -> bool {
        self.category.is_none_or(|category| item.category == category)
            && item.title_matches(&self.search)
    }
}

/// Keep the items whose category matches (or `category` is `None`) and whose
/// title contains `search` ignoring case (or `search` is empty).
///
/// Input order is preserved; there is no ranking.
#[must_use]
pub fn filter<'a>(items: &'a [MenuItem], category: Option<Category>, search: &str) -> Vec<&'a MenuItem> {
    let menu_filter = MenuFilter::all()
        .with_category(category)
        .with_search(search);
    items
        .iter()
        .filter(|item| menu_filter.matches(item))
        .collect()
}

#[derive(Debug, Deserialize)]
struct MenuFile {
    #[serde(default)]
    items: Vec<MenuEntry>,
}

#[derive(Debug, Deserialize)]
struct MenuEntry {
    id: MenuItemId,
    title: String,
    #[serde(default)]
    description: String,
    price: String,
    #[serde(default)]
    image: String,
    category: String,
}

impl MenuEntry {
    fn validate(self) -> Result<MenuItem, CatalogError> {
        let price = Price::parse(&self.price).map_err(|source| CatalogError::InvalidPrice {
            title: self.title.clone(),
            source,
        })?;
        let category =
            self.category
                .parse::<Category>()
                .map_err(|source| CatalogError::InvalidCategory {
                    title: self.title.clone(),
                    source,
                })?;

        Ok(MenuItem {
            id: self.id,
            title: self.title,
            description: self.description,
            price,
            image: self.image,
            category,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn titles(items: &[&MenuItem]) -> Vec<String> {
        items.iter().map(|item| item.title.clone()).collect()
    }

    #[test]
    fn test_demo_menu() {
        let catalog = MenuCatalog::demo();
        assert_eq!(catalog.len(), 5);
        assert_eq!(
            titles(&catalog.items().iter().collect::<Vec<_>>()),
            ["Greek Salad", "Bruschetta", "Grilled Fish", "Pasta", "Lemon Dessert"]
        );
        assert_eq!(catalog.currency(), Some(CurrencyCode::USD));
        assert_eq!(
            catalog.get(MenuItemId::new(3)).unwrap().price.to_string(),
            "$20.00"
        );
        assert!(catalog.get(MenuItemId::new(99)).is_none());
        // The demo menu passes the same validation as a loaded one.
        assert!(MenuCatalog::new(catalog.items().to_vec()).is_ok());
    }

    #[test]
    fn test_filter_by_category_keeps_menu_order() {
        let catalog = MenuCatalog::demo();
        let mains = filter(catalog.items(), Some(Category::Mains), "");
        assert_eq!(titles(&mains), ["Grilled Fish", "Pasta"]);

        let starters = catalog.filter(&MenuFilter::all().with_category(Some(Category::Starters)));
        assert_eq!(titles(&starters), ["Greek Salad", "Bruschetta"]);
    }

    #[test]
    fn test_matches() {
        let catalog = MenuCatalog::demo();
        let fish = catalog.get(MenuItemId::new(3)).unwrap();

        assert!(MenuFilter::all().matches(fish));
        assert!(MenuFilter::all().with_category(Some(Category::Mains)).matches(fish));
        assert!(!MenuFilter::all().with_category(Some(Category::Starters)).matches(fish));
        assert!(MenuFilter::all().with_search("FISH").matches(fish));
        assert!(!MenuFilter::all().with_search("pasta").matches(fish));
        assert!(
            !MenuFilter::all()
                .with_category(Some(Category::Mains))
                .with_search("salad")
                .matches(fish)
        );
    }

    #[test]
    fn test_free_filter_agrees_with_catalog_filter() {
        let catalog = MenuCatalog::demo();
        for category in [None, Some(Category::Starters), Some(Category::Mains), Some(Category::Drinks)] {
            for search in ["", "e", "LEMON", "zzz"] {
                let menu_filter = MenuFilter::all().with_category(category).with_search(search);
                assert_eq!(
                    filter(catalog.items(), category, search),
                    catalog.filter(&menu_filter),
                    "{category:?} {search:?}"
                );
            }
        }
    }

    #[test]
    fn test_filter_all_with_empty_search_returns_everything() {
        let catalog = MenuCatalog::demo();
        assert_eq!(catalog.filter(&MenuFilter::all()).len(), 5);
    }

    #[test]
    fn test_search_ignores_case() {
        let catalog = MenuCatalog::demo();
        for search in ["lemon", "LEMON", "LeMoN"] {
            let found = filter(catalog.items(), None, search);
            assert_eq!(titles(&found), ["Lemon Dessert"], "search {search:?}");
        }
    }

    #[test]
    fn test_search_matches_substrings() {
        let catalog = MenuCatalog::demo();
        let found = filter(catalog.items(), None, "ill");
        assert_eq!(titles(&found), ["Grilled Fish"]);
    }

    #[test]
    fn test_category_and_search_combine() {
        let catalog = MenuCatalog::demo();
        assert!(filter(catalog.items(), Some(Category::Mains), "lemon").is_empty());
        assert!(filter(catalog.items(), Some(Category::Drinks), "").is_empty());

        let found = filter(catalog.items(), Some(Category::Starters), "SALAD");
        assert_eq!(titles(&found), ["Greek Salad"]);
    }

    #[test]
    fn test_filter_empty_catalog() {
        assert!(filter(&[], Some(Category::Mains), "fish").is_empty());
        assert!(MenuCatalog::default().filter(&MenuFilter::all()).is_empty());
    }

    #[test]
    fn test_from_yaml() {
        let catalog = MenuCatalog::from_yaml_str(
            r#"
items:
  - id: 10
    title: Lemonade
    description: Fresh squeezed.
    price: "$3.50"
    image: Lemonade
    category: drinks
  - id: 11
    title: Baklava
    price: "$5"
    category: Desserts
"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let lemonade = catalog.get(MenuItemId::new(10)).unwrap();
        assert_eq!(lemonade.category, Category::Drinks);
        assert_eq!(lemonade.price.to_string(), "$3.50");
        assert_eq!(catalog.get(MenuItemId::new(11)).unwrap().description, "");
    }

    #[test]
    fn test_from_yaml_rejects_bad_price() {
        let err = MenuCatalog::from_yaml_str(
            r#"
items:
  - id: 1
    title: Soup
    price: "three dollars"
    category: starters
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidPrice {
                source: PriceError::MissingCurrencySymbol,
                ..
            }
        ));
    }

    #[test]
    fn test_from_yaml_rejects_bad_category() {
        let err = MenuCatalog::from_yaml_str(
            r#"
items:
  - id: 1
    title: Soup
    price: "$4.00"
    category: soups
"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCategory { .. }));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = MenuCatalog::from_yaml_str(
            r#"
items:
  - { id: 1, title: A, price: "$1", category: mains }
  - { id: 1, title: B, price: "$2", category: mains }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { id } if id == MenuItemId::new(1)));
    }

    #[test]
    fn test_rejects_mixed_currencies() {
        let err = MenuCatalog::from_yaml_str(
            r#"
items:
  - { id: 1, title: A, price: "$1", category: mains }
  - { id: 2, title: B, price: "€2", category: mains }
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MixedCurrency {
                expected: CurrencyCode::USD,
                found: CurrencyCode::EUR,
                ..
            }
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MenuCatalog::load(dir.path().join("menu.yaml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.yaml");
        std::fs::write(
            &path,
            "items:\n  - { id: 7, title: Espresso, price: \"$2.75\", category: drinks }\n",
        )
        .unwrap();

        let catalog = MenuCatalog::load(&path).unwrap();
        assert_eq!(catalog.items()[0].title, "Espresso");
    }
}
