//! Checkout route handler.
//!
//! There is no payment step: checkout shows the order summary for a
//! non-empty cart and refuses to proceed for an empty one.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shophub_core::Cart;
use tower_sessions::Session;
use tracing::instrument;

use super::cart::CartView;
use crate::filters;
use crate::nav::NavEffects;
use crate::services::CartStore;

/// Message shown when checkout is attempted with an empty cart.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty!";

/// Checkout summary page.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub nav: NavEffects,
}

/// Blocking alert shown instead of the checkout page.
#[derive(Template, WebTemplate)]
#[template(path = "checkout_blocked.html")]
pub struct CheckoutBlockedTemplate {
    pub message: &'static str,
    pub nav: NavEffects,
}

/// Decide whether `cart` may proceed to checkout.
///
/// # Errors
///
/// Returns the warning to show when the cart is empty.
pub fn checkout_gate(cart: &Cart) -> Result<CartView, &'static str> {
    if cart.is_empty() {
        Err(EMPTY_CART_MESSAGE)
    } else {
        Ok(CartView::from(cart))
    }
}

/// Show the checkout summary, or the empty-cart alert.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Response {
    let store = CartStore::initialize(session).await;
    let nav = NavEffects::default();

    match checkout_gate(store.cart()) {
        Ok(cart) => CheckoutTemplate { cart, nav }.into_response(),
        Err(message) => {
            tracing::info!("Checkout blocked: cart is empty");
            (
                StatusCode::CONFLICT,
                CheckoutBlockedTemplate { message, nav },
            )
                .into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shophub_core::Product;

    #[test]
    fn test_empty_cart_is_blocked() {
        assert_eq!(checkout_gate(&Cart::new()).err(), Some("Your cart is empty!"));
    }

    #[test]
    fn test_non_empty_cart_proceeds() {
        let mut cart = Cart::new();
        cart.add(Product::from_display("Mug", "", "14".parse().unwrap(), ""));

        let view = checkout_gate(&cart).unwrap();
        assert_eq!(view.item_count, 1);
        assert_eq!(view.total, "$15.12");
    }

    #[test]
    fn test_blocked_page_is_an_alert() {
        let html = CheckoutBlockedTemplate {
            message: EMPTY_CART_MESSAGE,
            nav: NavEffects::default(),
        }
        .render()
        .unwrap();

        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("Your cart is empty!"));
    }
}
