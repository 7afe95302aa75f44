//! Core types for ShopHub.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod price;
pub mod slug;

pub use email::{Email, EmailError};
pub use price::{CurrencyCode, Price, format_money};
pub use slug::ProductSlug;
