//! Little Lemon ordering library.
//!
//! Everything the ordering app does apart from drawing screens lives here:
//!
//! - [`catalog`] - the menu and its category/search filter
//! - [`cart`] - quantities per menu item, totals and checkout
//! - [`profile`] - onboarding gate, profile edits and logout
//! - [`storage`] - synchronous key-value persistence for profile fields
//! - [`state`] - the injected application state a front-end drives
//!
//! Front-ends hold an [`state::AppState`] and route user actions into it.
//! There are no global singletons; every store is owned by the state and
//! borrowed by whatever screen needs it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod profile;
pub mod state;
pub mod storage;

pub use error::{AppError, Result};
