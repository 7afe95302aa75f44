//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session (see [`CartStore`]).
//!
//! Every mutation answers with out-of-band fragments for the cart badge,
//! the cart item list and (when there is one) the toast, plus an
//! `HX-Trigger: cart-updated` header for any other view that shows the cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shophub_core::{Cart, LineItem, Price, Product, ProductSlug, format_money};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::notifications::{ADD_BUTTON_RESET_AFTER, ScheduledSwap, ToastTemplate};
use crate::services::{CartStore, CartUpdate};

/// Event name other cart views listen for.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl CartView {
    /// Whether to show the empty-state panel instead of items and summary.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            item_count: totals.item_count,
            subtotal: format_money(totals.subtotal),
            tax: format_money(totals.tax),
            total: format_money(totals.total),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: format_money(item.price),
            line_price: format_money(item.line_total()),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data: the product card's display fields.
///
/// Nothing is required; missing fields become empty strings.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image: String,
}

impl AddToCartForm {
    /// The product as displayed, with its ID derived from the name.
    #[must_use]
    pub fn into_product(self) -> Product {
        let price = Price::parse_display(&self.price).map_or_else(
            || {
                tracing::warn!(price = %self.price, "Unparsable product price, using 0");
                Decimal::ZERO
            },
            |price| price.amount,
        );
        Product::from_display(self.name, self.description, price, self.image)
    }
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart items fragment: item rows and order summary, or the empty state.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
    pub oob: bool,
}

/// Cart count badge fragment. Hidden when the count is zero.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
    pub oob: bool,
    /// Play the "item added" bump animation.
    pub bump: bool,
}

/// The idle add-to-cart button.
#[derive(Template, WebTemplate)]
#[template(path = "partials/add_button.html")]
pub struct AddButtonTemplate;

/// The "Added!" button, which swaps itself back to [`AddButtonTemplate`].
#[derive(Template, WebTemplate)]
#[template(path = "partials/added_button.html")]
pub struct AddedButtonTemplate {
    pub reset: ScheduledSwap,
}

// =============================================================================
// Rendering
// =============================================================================

/// Render the response to a cart mutation.
///
/// `primary` is swapped into the requesting element; the badge, item list
/// and toast are swapped out-of-band.
fn render_update(
    primary: Option<String>,
    cart: &Cart,
    update: &CartUpdate,
    bump: bool,
) -> Result<Response> {
    let mut body = primary.unwrap_or_default();

    body.push_str(
        &CartCountTemplate {
            count: cart.item_count(),
            oob: true,
            bump,
        }
        .render()?,
    );
    body.push_str(
        &CartItemsTemplate {
            cart: CartView::from(cart),
            oob: true,
        }
        .render()?,
    );
    if let Some(notification) = &update.notification {
        body.push_str(&notification.template().render()?);
    }

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        Html(body),
    )
        .into_response())
}

// =============================================================================
// Handlers
// =============================================================================

/// Cart items fragment for the current session.
#[instrument(skip(session))]
pub async fn items(session: Session) -> impl IntoResponse {
    let store = CartStore::initialize(session).await;
    CartItemsTemplate {
        cart: CartView::from(store.cart()),
        oob: false,
    }
}

/// Cart count badge fragment.
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let store = CartStore::initialize(session).await;
    CartCountTemplate {
        count: store.item_count(),
        oob: false,
        bump: false,
    }
}

/// Add a product to the cart (HTMX).
///
/// Swaps the clicked button for "Added!" and refreshes the badge, the item
/// list and the toast.
#[instrument(skip(session), fields(product = %form.name))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Result<Response> {
    let product = form.into_product();
    add_breadcrumb("cart", "Added item", &[("id", product.id.as_str())]);

    let mut store = CartStore::initialize(session).await;
    let update = store.add(product).await;

    let button = AddedButtonTemplate {
        reset: ScheduledSwap::new("/cart/add-button", ADD_BUTTON_RESET_AFTER),
    }
    .render()?;

    render_update(Some(button), store.cart(), &update, true)
}

/// Change a line item's quantity by `delta` (HTMX).
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    let id = ProductSlug::new(form.id);

    let mut store = CartStore::initialize(session).await;
    let update = store.update_quantity(&id, form.delta).await;

    render_update(None, store.cart(), &update, false)
}

/// Remove a line item (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Response> {
    let id = ProductSlug::new(form.id);
    add_breadcrumb("cart", "Removed item", &[("id", id.as_str())]);

    let mut store = CartStore::initialize(session).await;
    let update = store.remove(&id).await;

    render_update(None, store.cart(), &update, false)
}

/// The idle add-to-cart button, requested when "Added!" expires.
pub async fn add_button() -> impl IntoResponse {
    AddButtonTemplate
}

/// Empty toast slot, requested when a toast expires.
pub async fn dismiss_notification() -> impl IntoResponse {
    ToastTemplate::empty()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shophub_core::CartChange;

    use crate::notifications::Notification;

    fn cart_with(items: &[(&str, &str, u32)]) -> Cart {
        let mut cart = Cart::new();
        for (name, price, qty) in items {
            for _ in 0..*qty {
                cart.add(Product::from_display(
                    *name,
                    "desc",
                    price.parse().unwrap(),
                    "/img.png",
                ));
            }
        }
        cart
    }

    #[test]
    fn test_cart_view_formats_totals() {
        let view = CartView::from(&cart_with(&[("Headphones", "19.99", 3)]));

        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "$59.97");
        assert_eq!(view.tax, "$4.80");
        assert_eq!(view.total, "$64.77");
        assert_eq!(view.items[0].price, "$19.99");
        assert_eq!(view.items[0].line_price, "$59.97");
    }

    #[test]
    fn test_form_into_product_parses_display_price() {
        let form = AddToCartForm {
            name: "  Smart Watch ".to_string(),
            description: "Tracks things".to_string(),
            price: "$199.00".to_string(),
            image: "/watch.jpg".to_string(),
        };
        let product = form.into_product();

        assert_eq!(product.id.as_str(), "smart-watch");
        assert_eq!(product.name, "Smart Watch");
        assert_eq!(product.price, "199".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_form_into_product_bad_price_is_zero() {
        let form = AddToCartForm {
            name: "Mystery Box".to_string(),
            description: String::new(),
            price: "call us".to_string(),
            image: String::new(),
        };
        assert_eq!(form.into_product().price, Decimal::ZERO);
    }

    #[test]
    fn test_empty_cart_renders_empty_state() {
        let html = CartItemsTemplate {
            cart: CartView::from(&Cart::new()),
            oob: false,
        }
        .render()
        .unwrap();

        assert!(html.contains("Your cart is empty"));
        assert!(!html.contains("cart-modal-footer"));
    }

    #[test]
    fn test_items_render_rows_with_controls() {
        let html = CartItemsTemplate {
            cart: CartView::from(&cart_with(&[("Desk Lamp", "45.25", 2), ("Mug", "14", 1)])),
            oob: true,
        }
        .render()
        .unwrap();

        assert!(html.contains("hx-swap-oob=\"true\""));
        assert!(html.contains("Desk Lamp"));
        assert!(html.contains("value=\"desk-lamp\""));
        assert!(html.contains("value=\"mug\""));
        assert!(html.contains("name=\"delta\" value=\"-1\""));
        assert!(html.contains("name=\"delta\" value=\"1\""));
        assert!(html.contains("/cart/remove"));
        assert!(html.contains("$104.50"));
        assert!(html.contains("cart-modal-footer"));
    }

    #[test]
    fn test_badge_hidden_when_zero() {
        let hidden = CartCountTemplate {
            count: 0,
            oob: false,
            bump: false,
        }
        .render()
        .unwrap();
        assert!(hidden.contains("hidden"));

        let shown = CartCountTemplate {
            count: 4,
            oob: false,
            bump: true,
        }
        .render()
        .unwrap();
        assert!(shown.contains(">4<"));
        assert!(!shown.contains("hidden"));
        assert!(shown.contains("cart-bump"));
    }

    #[test]
    fn test_render_update_includes_toast_only_when_notified() {
        let cart = cart_with(&[("Mug", "14", 1)]);

        let quiet = CartUpdate {
            change: CartChange::Unchanged,
            notification: None,
        };
        let response = render_update(None, &cart, &quiet, false).unwrap();
        assert_eq!(response.headers()["HX-Trigger"], CART_UPDATED_EVENT);

        let noisy = CartUpdate {
            change: CartChange::Removed(ProductSlug::new("tea")),
            notification: Some(Notification::item_removed()),
        };
        assert!(render_update(None, &cart, &noisy, false).is_ok());
    }

    #[test]
    fn test_added_button_schedules_reset() {
        let html = AddedButtonTemplate {
            reset: ScheduledSwap::new("/cart/add-button", ADD_BUTTON_RESET_AFTER),
        }
        .render()
        .unwrap();

        assert!(html.contains("Added!"));
        assert!(html.contains("hx-get=\"/cart/add-button\""));
        assert!(html.contains("load delay:1500ms"));
    }
}
