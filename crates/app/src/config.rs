//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LITTLE_LEMON_DATA_DIR` - Directory for the profile file (default: `.little-lemon`)
//! - `LITTLE_LEMON_MENU_PATH` - YAML menu file (default: built-in demo menu)
//! - `LITTLE_LEMON_CURRENCY` - Currency shown for an empty cart (default: `USD`)
//! - `RUST_LOG` - Log filter, read by the binary's subscriber

use std::path::PathBuf;

use thiserror::Error;

use little_lemon_core::CurrencyCode;

const DATA_DIR_VAR: &str = "LITTLE_LEMON_DATA_DIR";
const MENU_PATH_VAR: &str = "LITTLE_LEMON_MENU_PATH";
const CURRENCY_VAR: &str = "LITTLE_LEMON_CURRENCY";

const DEFAULT_DATA_DIR: &str = ".little-lemon";
const PROFILE_FILE_NAME: &str = "profile.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Little Lemon application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the persisted profile
    pub data_dir: PathBuf,
    /// YAML menu file; `None` uses the demo menu
    pub menu_path: Option<PathBuf>,
    /// Currency for totals of an empty cart
    pub currency: CurrencyCode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            menu_path: None,
            currency: CurrencyCode::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let data_dir = get(DATA_DIR_VAR).map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let menu_path = get(MENU_PATH_VAR).map(PathBuf::from);
        let currency = get(CURRENCY_VAR)
            .map(|value| {
                value
                    .parse::<CurrencyCode>()
                    .map_err(|e| ConfigError::InvalidEnvVar(CURRENCY_VAR.to_owned(), e.to_string()))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            data_dir,
            menu_path,
            currency,
        })
    }

    /// Where the profile key-value file lives.
    #[must_use]
    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join(PROFILE_FILE_NAME)
    }
}
