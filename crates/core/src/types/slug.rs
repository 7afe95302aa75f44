//! Product slugs used as cart line item IDs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product identifier derived from the product's display name.
///
/// Two products with the same display name map to the same slug; the cart
/// treats them as one product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductSlug(String);

impl ProductSlug {
    /// Wrap an already-derived slug without normalizing it.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Derive a slug from a display name.
    ///
    /// The name is trimmed and lowercased, and each run of whitespace
    /// becomes a single `-`.
    ///
    /// ```
    /// use shophub_core::ProductSlug;
    ///
    /// let slug = ProductSlug::from_name("  Wireless   Headphones ");
    /// assert_eq!(slug.as_str(), "wireless-headphones");
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        Self(lower.split_whitespace().collect::<Vec<_>>().join("-"))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the slug and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductSlug {
    fn from(slug: &str) -> Self {
        Self::new(slug)
    }
}
