//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;
use tracing::instrument;

use super::cart::CartView;
use crate::catalog::{self, CatalogProduct};
use crate::filters;
use crate::nav::NavEffects;
use crate::services::CartStore;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub compare_at: Option<String>,
    pub image: String,
    pub badge: Option<String>,
}

impl From<&CatalogProduct> for ProductCardView {
    fn from(product: &CatalogProduct) -> Self {
        Self {
            slug: product.slug().into_inner(),
            name: product.name.to_string(),
            description: product.description.to_string(),
            price: product.price.to_string(),
            compare_at: product.compare_at.map(str::to_string),
            image: product.image.to_string(),
            badge: product.badge.map(str::to_string),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub cart: CartView,
    pub nav: NavEffects,
}

/// Display the home page.
///
/// The cart modal is rendered with whatever the session already holds, so a
/// reload shows the same items in the same order.
#[instrument(skip(session))]
pub async fn home(session: Session) -> impl IntoResponse {
    let store = CartStore::initialize(session).await;

    HomeTemplate {
        products: catalog::products()
            .iter()
            .map(ProductCardView::from)
            .collect(),
        cart: CartView::from(store.cart()),
        nav: NavEffects::default(),
    }
}
