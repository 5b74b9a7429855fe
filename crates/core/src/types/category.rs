//! Menu categories.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string names no [`Category`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category {0:?} (expected one of: starters, mains, desserts, drinks)")]
pub struct CategoryError(pub String);

/// The fixed groupings a menu is organised into.
///
/// A category filter is an `Option<Category>` where `None` means "All".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Starters,
    Mains,
    Desserts,
    Drinks,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Self; 4] = [Self::Starters, Self::Mains, Self::Desserts, Self::Drinks];

    /// Display name as shown on the category chips.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Starters => "Starters",
            Self::Mains => "Mains",
            Self::Desserts => "Desserts",
            Self::Drinks => "Drinks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CategoryError(s.to_owned()))
    }
}
