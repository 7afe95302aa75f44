//! ShopHub Core - Cart state and shared types.
//!
//! This crate provides the types used by the ShopHub storefront:
//! - [`cart`] - The cart state machine (line items, mutations, derived totals)
//! - [`types`] - Newtype wrappers for slugs, prices and emails
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no sessions, no HTTP. Persisting and rendering a [`Cart`] is the
//! storefront's job; everything here can be unit tested without a server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartChange, CartTotals, LineItem, Product, TAX_RATE};
pub use types::*;
