//! Session-backed cart store.
//!
//! `CartStore` owns the cart for one request: it is restored from session
//! storage once, mutated through [`CartStore::add`], [`CartStore::remove`]
//! and [`CartStore::update_quantity`], and written back after every
//! mutation that changed something. Each mutation returns a [`CartUpdate`]
//! telling the caller whether a toast should be shown; re-rendering is
//! always the caller's next step.

use rust_decimal::Decimal;
use shophub_core::{Cart, CartChange, CartTotals, Product, ProductSlug};

use crate::notifications::Notification;
use crate::storage::{SessionStorage, StorageError};

/// Session key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "shophub_cart";

/// Result of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartUpdate {
    pub change: CartChange,
    pub notification: Option<Notification>,
}

/// The cart for the current session.
pub struct CartStore<S> {
    storage: S,
    cart: Cart,
}

impl<S: SessionStorage> CartStore<S> {
    /// Restore the cart persisted for this session.
    ///
    /// Missing, unreadable or malformed data yields an empty cart.
    pub async fn initialize(storage: S) -> Self {
        let cart = match storage.get(CART_STORAGE_KEY).await {
            Ok(Some(json)) => Cart::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding malformed cart from session");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart from session");
                Cart::new()
            }
        };

        Self { storage, cart }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of `product` and announce it.
    pub async fn add(&mut self, product: Product) -> CartUpdate {
        let change = self.cart.add(product);
        self.persist(&change).await;
        tracing::info!(?change, item_count = self.cart.item_count(), "Cart add");

        CartUpdate {
            change,
            notification: Some(Notification::item_added()),
        }
    }

    /// Remove the line item `id`. Unknown IDs change nothing and show no toast.
    pub async fn remove(&mut self, id: &ProductSlug) -> CartUpdate {
        let change = self.cart.remove(id);
        self.persist(&change).await;
        tracing::info!(?change, item_count = self.cart.item_count(), "Cart remove");

        let notification = change.is_changed().then(Notification::item_removed);
        CartUpdate {
            change,
            notification,
        }
    }

    /// Adjust the quantity of `id` by `delta`.
    ///
    /// Dropping to zero removes the item exactly like [`Self::remove`],
    /// toast included; other quantity changes are silent.
    pub async fn update_quantity(&mut self, id: &ProductSlug, delta: i64) -> CartUpdate {
        let change = self.cart.update_quantity(id, delta);
        self.persist(&change).await;
        tracing::info!(?change, delta, "Cart quantity update");

        let notification =
            matches!(change, CartChange::Removed(_)).then(Notification::item_removed);
        CartUpdate {
            change,
            notification,
        }
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }

    #[must_use]
    pub fn tax(&self) -> Decimal {
        self.cart.tax()
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Write the cart back if `change` modified it.
    ///
    /// Failures are logged; the in-memory cart stays authoritative for this
    /// request.
    async fn persist(&self, change: &CartChange) {
        if !change.is_changed() {
            return;
        }

        if let Err(e) = self.save().await {
            tracing::error!(error = %e, "Failed to persist cart to session");
        }
    }

    async fn save(&self) -> Result<(), StorageError> {
        let json = self.cart.to_json()?;
        self.storage.set(CART_STORAGE_KEY, json).await
    }
}
