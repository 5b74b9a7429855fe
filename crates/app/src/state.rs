//! Application state handed to the front-end.

use std::sync::Arc;

use tracing::info;

use crate::cart::Cart;
use crate::catalog::MenuCatalog;
use crate::config::AppConfig;
use crate::error::Result;
use crate::profile::{ProfileStore, Screen};
use crate::storage::{JsonFileStore, KeyValueStore};

/// Everything a running session needs, owned in one place.
///
/// The catalog is read-only and shared through an `Arc`; the cart and
/// profile are mutated through `&mut` borrows, so there is exactly one
/// writer at a time.
#[derive(Debug)]
pub struct AppState<S> {
    config: AppConfig,
    catalog: Arc<MenuCatalog>,
    cart: Cart,
    profile: ProfileStore<S>,
}

impl AppState<JsonFileStore> {
    /// Build state from configuration: load the menu and open the profile
    /// file.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu file or the profile file is unreadable.
    pub fn open(config: AppConfig) -> Result<Self> {
        let catalog = match &config.menu_path {
            Some(path) => MenuCatalog::load(path)?,
            None => MenuCatalog::demo(),
        };
        let store = JsonFileStore::open(config.profile_path())?;

        info!(
            menu_items = catalog.len(),
            profile = %store.path().display(),
            "Application state ready"
        );
        Ok(Self::new(config, catalog, store))
    }
}

impl<S: KeyValueStore> AppState<S> {
    /// Assemble state from its parts.
    pub fn new(config: AppConfig, catalog: MenuCatalog, store: S) -> Self {
        let currency = catalog.currency().unwrap_or(config.currency);
        Self {
            config,
            catalog: Arc::new(catalog),
            cart: Cart::new(currency),
            profile: ProfileStore::new(store),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared handle to the menu.
    #[must_use]
    pub fn catalog(&self) -> Arc<MenuCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    #[must_use]
    pub const fn profile(&self) -> &ProfileStore<S> {
        &self.profile
    }

    pub const fn profile_mut(&mut self) -> &mut ProfileStore<S> {
        &mut self.profile
    }

    /// The screen the onboarding gate currently allows.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.profile.screen()
    }
}
