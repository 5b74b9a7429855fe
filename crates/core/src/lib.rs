//! Little Lemon Core - Shared domain types.
//!
//! This crate provides the value types used across the Little Lemon crates:
//! - `app` - Menu catalog, cart and profile stores
//! - `cli` - Terminal front-end for browsing and ordering
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for menu item IDs, prices, emails, and categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
