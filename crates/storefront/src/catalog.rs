//! Demo product catalog shown on the home page.

use shophub_core::ProductSlug;

/// A product card as displayed on the page.
///
/// `price` is the display text; the cart parses it back when the card's
/// add-to-cart form is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProduct {
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub compare_at: Option<&'static str>,
    pub image: &'static str,
    pub badge: Option<&'static str>,
}

impl CatalogProduct {
    /// Slug used for element IDs on the card.
    #[must_use]
    pub fn slug(&self) -> ProductSlug {
        ProductSlug::from_name(self.name)
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

const PRODUCTS: &[CatalogProduct] = &[
    CatalogProduct {
        name: "Wireless Headphones",
        description: "Noise-cancelling over-ear headphones with 30-hour battery life.",
        price: "$19.99",
        compare_at: Some("$39.99"),
        image: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=600",
        badge: Some("Sale"),
    },
    CatalogProduct {
        name: "Smart Watch",
        description: "Fitness tracking, heart-rate monitoring and notifications on your wrist.",
        price: "$199.00",
        compare_at: None,
        image: "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=600",
        badge: Some("New"),
    },
    CatalogProduct {
        name: "Leather Backpack",
        description: "Full-grain leather backpack with a padded 15-inch laptop sleeve.",
        price: "$89.50",
        compare_at: None,
        image: "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=600",
        badge: None,
    },
    CatalogProduct {
        name: "Ceramic Coffee Mug",
        description: "Hand-glazed 12 oz mug, dishwasher and microwave safe.",
        price: "$14.00",
        compare_at: None,
        image: "https://images.unsplash.com/photo-1514228742587-6b1558fcca3d?w=600",
        badge: None,
    },
    CatalogProduct {
        name: "Running Shoes",
        description: "Lightweight trainers with responsive cushioning for daily runs.",
        price: "$120.00",
        compare_at: Some("$150.00"),
        image: "https://images.unsplash.com/photo-1542291026-7eedf19c0ef0?w=600",
        badge: Some("Sale"),
    },
    CatalogProduct {
        name: "Desk Lamp",
        description: "Dimmable LED desk lamp with a USB charging port.",
        price: "$45.25",
        compare_at: None,
        image: "https://images.unsplash.com/photo-1507473885765-e6ed057f782c?w=600",
        badge: None,
    },
];

/// All demo products in display order.
#[must_use]
pub const fn products() -> &'static [CatalogProduct] {
    PRODUCTS
}

/// Products whose name or description contains `query` (case-insensitive).
#[must_use]
pub fn search(query: &str) -> Vec<&'static CatalogProduct> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    PRODUCTS.iter().filter(|p| p.matches(&needle)).collect()
}
