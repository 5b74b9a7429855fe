//! Integration tests for Little Lemon.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p little-lemon-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `onboarding_flow` - Registration, profile edits and logout against the
//!   file-backed store, including restarts
//! - `ordering_flow` - Browsing, filtering, cart and checkout through
//!   [`AppState`](little_lemon_app::state::AppState)

use std::path::Path;

use little_lemon_app::config::AppConfig;

/// Configuration that keeps all state under `dir`.
#[must_use]
pub fn config_in(dir: &Path) -> AppConfig {
    AppConfig {
        data_dir: dir.to_path_buf(),
        ..AppConfig::default()
    }
}
