//! Menu screens: the filtered list and an item's detail view.

use std::io::{self, Write};

use little_lemon_app::catalog::{MenuCatalog, MenuFilter};
use little_lemon_app::models::MenuItem;
use little_lemon_core::Category;

/// Print the category chips, then every item passing `menu_filter`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list(out: &mut impl Write, catalog: &MenuCatalog, menu_filter: &MenuFilter) -> io::Result<()> {
    write_categories(out, menu_filter.category)?;
    if !menu_filter.search.is_empty() {
        writeln!(out, "Search: {:?}", menu_filter.search)?;
    }

    let items = catalog.filter(menu_filter);
    if items.is_empty() {
        return writeln!(out, "No dishes match.");
    }

    for item in items {
        writeln!(
            out,
            "{:>3}  {:<16} {:>8}  {}",
            item.id.as_u32(),
            item.title,
            item.price.to_string(),
            item.description
        )?;
    }
    Ok(())
}

/// Print a single item's detail view.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn detail(out: &mut impl Write, item: &MenuItem, in_cart: u32) -> io::Result<()> {
    writeln!(out, "{}", item.title)?;
    writeln!(out, "{}", item.price)?;
    writeln!(out, "{}", item.description)?;
    writeln!(out, "Category: {}", item.category)?;
    if in_cart > 0 {
        writeln!(out, "In your cart: {in_cart}")?;
    }
    writeln!(out, "Add with: add {} [quantity 1-10]", item.id)
}

// Selected chip is bracketed.
fn write_categories(out: &mut impl Write, selected: Option<Category>) -> io::Result<()> {
    let chip = |name: &str, on: bool| {
        if on {
            format!("[{name}]")
        } else {
            name.to_owned()
        }
    };

    let mut chips = vec![chip("All", selected.is_none())];
    chips.extend(
        Category::ALL
            .iter()
            .map(|category| chip(category.name(), selected == Some(*category))),
    );
    writeln!(out, "ORDER FOR DELIVERY! {}", chips.join(" "))
}
