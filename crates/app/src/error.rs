//! Unified error handling.
//!
//! Each store has its own error enum; `AppError` wraps them so front-ends
//! can propagate any of them with `?` and decide what to show the user.

use thiserror::Error;

use crate::cart::{CheckoutError, QuantityError};
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::profile::{ProfileError, ValidationError};
use crate::storage::StorageError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Menu data is unreadable or invalid.
    #[error("Menu error: {0}")]
    Catalog(#[from] CatalogError),

    /// Profile storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Registration or profile input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Checkout could not proceed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Quantity outside the allowed range.
    #[error(transparent)]
    Quantity(#[from] QuantityError),

    /// A referenced menu item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether the error is a problem with what the user typed, as opposed
    /// to a fault in the app's environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Checkout(_) | Self::Quantity(_) | Self::NotFound(_)
        )
    }
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Validation(e) => Self::Validation(e),
            ProfileError::Storage(e) => Self::Storage(e),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_errors_flatten() {
        let err = AppError::from(ProfileError::Validation(ValidationError::EmptyName));
        assert!(matches!(err, AppError::Validation(ValidationError::EmptyName)));
        assert!(err.is_user_error());
        assert_eq!(err.to_string(), "Please enter your name.");
    }

    #[test]
    fn test_environment_errors_are_not_user_errors() {
        let err = AppError::from(ConfigError::InvalidEnvVar("X".into(), "bad".into()));
        assert!(!err.is_user_error());
        assert!(AppError::from(CheckoutError::EmptyCart).is_user_error());
    }
}
