//! Cart state machine.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s keyed by [`ProductSlug`].
//! Mutations are pure: they change the in-memory list and report what
//! happened as a [`CartChange`]. Persisting the cart and re-rendering it is
//! left to the caller.
//!
//! # Invariants
//!
//! - Every line item has `quantity >= 1`; driving a quantity to zero or
//!   below removes the item.
//! - No two line items share an `id`.
//! - [`Cart::to_json`] / [`Cart::from_json`] round-trip the exact ordered
//!   sequence of line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductSlug;

/// Sales tax applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// A product as shown on a product card at the moment it is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductSlug,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
}

impl Product {
    /// Build a product from its display fields, deriving the ID from the name.
    #[must_use]
    pub fn from_display(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        let name = name.into().trim().to_string();
        Self {
            id: ProductSlug::from_name(&name),
            name,
            description: description.into(),
            price,
            image: image.into(),
        }
    }
}

/// One product's presence in the cart.
///
/// Display fields and price are copied when the product is first added and
/// never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductSlug,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub quantity: u32,
}

impl LineItem {
    fn new(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            image: product.image,
            quantity: 1,
        }
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// What a mutation did to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line item was appended with quantity 1.
    Added(ProductSlug),
    /// An existing line item's quantity went up by one via `add`.
    Incremented { id: ProductSlug, quantity: u32 },
    /// A line item's quantity was adjusted and is still positive.
    QuantityChanged { id: ProductSlug, quantity: u32 },
    /// A line item was removed.
    Removed(ProductSlug),
    /// Nothing matched; the cart is untouched.
    Unchanged,
}

impl CartChange {
    /// Whether the cart contents differ from before the mutation.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Derived totals for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub item_count: u32,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line item by ID.
    #[must_use]
    pub fn get(&self, id: &ProductSlug) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Add one unit of `product`.
    ///
    /// An existing line item with the same ID only has its quantity bumped;
    /// its name, price and other fields stay as they were first added.
    pub fn add(&mut self, product: Product) -> CartChange {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return CartChange::Incremented {
                id: item.id.clone(),
                quantity: item.quantity,
            };
        }

        let id = product.id.clone();
        self.items.push(LineItem::new(product));
        CartChange::Added(id)
    }

    /// Remove the line item with `id`, if present.
    pub fn remove(&mut self, id: &ProductSlug) -> CartChange {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            CartChange::Unchanged
        } else {
            CartChange::Removed(id.clone())
        }
    }

    /// Adjust the quantity of `id` by `delta`.
    ///
    /// A resulting quantity of zero or less removes the item.
    pub fn update_quantity(&mut self, id: &ProductSlug, delta: i64) -> CartChange {
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return CartChange::Unchanged;
        };

        let next = i64::from(item.quantity).saturating_add(delta);
        if next <= 0 {
            return self.remove(id);
        }

        item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        CartChange::QuantityChanged {
            id: item.id.clone(),
            quantity: item.quantity,
        }
    }

    /// Sum of quantities across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Sum of `price * quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// `subtotal * TAX_RATE`, unrounded.
    #[must_use]
    pub fn tax(&self) -> Decimal {
        self.subtotal() * TAX_RATE
    }

    /// `subtotal + tax`, unrounded.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal() + self.tax()
    }

    /// All derived totals at once.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = subtotal * TAX_RATE;
        CartTotals {
            item_count: self.item_count(),
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Serialize to the JSON stored in the session.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a cart from its stored JSON.
    ///
    /// Entries that would break the cart invariants (zero quantity, repeated
    /// IDs) are dropped; the first occurrence of an ID wins.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a serialized cart.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut cart: Self = serde_json::from_str(json)?;
        cart.normalize();
        Ok(cart)
    }

    fn normalize(&mut self) {
        let mut seen: Vec<ProductSlug> = Vec::with_capacity(self.items.len());
        self.items.retain(|item| {
            if item.quantity == 0 || seen.contains(&item.id) {
                return false;
            }
            seen.push(item.id.clone());
            true
        });
    }
}
