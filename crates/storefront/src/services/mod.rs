//! Domain services for the storefront.

pub mod cart;

pub use cart::{CART_STORAGE_KEY, CartStore, CartUpdate};
