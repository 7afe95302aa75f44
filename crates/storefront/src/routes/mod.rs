//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            - Home page (catalog + cart modal)
//! GET  /health                      - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart/items                  - Cart items fragment
//! GET  /cart/count                  - Cart count badge
//! POST /cart/add                    - Add product (answers with the "Added!" button)
//! POST /cart/update                 - Change quantity by a delta
//! POST /cart/remove                 - Remove item
//! GET  /cart/add-button             - Reset add-to-cart button
//! GET  /notifications/{id}/dismiss  - Clear a toast
//!
//! # Checkout
//! GET  /checkout                    - Order summary, or 409 when the cart is empty
//!
//! # Page chrome
//! POST /nav                         - Mobile navigation transition
//! GET  /newsletter/form             - Idle subscribe form
//! POST /newsletter                  - Subscribe
//! GET  /search                      - Search results fragment
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod nav;
pub mod newsletter;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(cart::items))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/add-button", get(cart::add_button))
}

/// Create the newsletter routes router.
pub fn newsletter_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(newsletter::subscribe))
        .route("/form", get(newsletter::form))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .route(
            "/notifications/{id}/dismiss",
            get(cart::dismiss_notification),
        )
        .route("/checkout", get(checkout::show))
        .route("/nav", post(nav::transition))
        .nest("/newsletter", newsletter_routes())
        .route("/search", get(search::search))
}
