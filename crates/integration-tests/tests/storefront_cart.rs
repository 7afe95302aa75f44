//! Integration tests for the session-backed cart.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use shophub_core::{Cart, Product, format_money};
use shophub_integration_tests::{TestClient, add_form};

/// The cart the server should hold after adding `name` at `price`, `times` times.
fn expected_cart(name: &str, price: &str, times: u32) -> Cart {
    let mut cart = Cart::new();
    for _ in 0..times {
        cart.add(Product::from_display(name, "Test product", price.parse().unwrap(), "/img.png"));
    }
    cart
}

#[tokio::test]
async fn test_badge_starts_hidden() {
    let mut client = TestClient::new();

    let resp = client.get("/cart/count").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("id=\"cart-count\""));
    assert!(resp.body.contains("hidden"));
}

#[tokio::test]
async fn test_add_updates_badge_items_and_toast() {
    let mut client = TestClient::new();

    let resp = client
        .post_form("/cart/add", &add_form("Wireless Headphones", "$19.99"))
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header("HX-Trigger"), Some("cart-updated"));
    assert!(resp.body.contains("Added!"));
    assert!(resp.body.contains("load delay:1500ms"));
    assert!(resp.body.contains("Item added to cart!"));
    assert!(resp.body.contains("load delay:2000ms"));
    assert!(resp.body.contains("data-id=\"wireless-headphones\""));
    assert!(resp.body.contains(">1<"));
}

#[tokio::test]
async fn test_repeated_add_increments_quantity() {
    let mut client = TestClient::new();

    for _ in 0..3 {
        client
            .post_form("/cart/add", &add_form("Wireless Headphones", "$19.99"))
            .await;
    }

    let expected = expected_cart("Wireless Headphones", "19.99", 3);
    let items = client.get("/cart/items").await;
    assert_eq!(items.body.matches("class=\"cart-item\"").count(), 1);
    assert!(items.body.contains(&format_money(expected.subtotal())));
    assert!(items.body.contains(&format_money(expected.tax())));
    assert!(items.body.contains(&format_money(expected.total())));
    assert_eq!(format_money(expected.total()), "$64.77");

    let count = client.get("/cart/count").await;
    assert!(count.body.contains(">3<"));
}

#[tokio::test]
async fn test_cart_survives_between_requests_in_order() {
    let mut client = TestClient::new();

    client.post_form("/cart/add", &add_form("Desk Lamp", "$45.25")).await;
    client.post_form("/cart/add", &add_form("Smart Watch", "$199.00")).await;

    let home = client.get("/").await;
    let lamp = home.body.find("data-id=\"desk-lamp\"").unwrap();
    let watch = home.body.find("data-id=\"smart-watch\"").unwrap();
    assert!(lamp < watch);
}

#[tokio::test]
async fn test_update_to_zero_removes_item() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", &add_form("Desk Lamp", "$45.25")).await;
    client.post_form("/cart/add", &add_form("Desk Lamp", "$45.25")).await;

    let resp = client.post_form("/cart/update", "id=desk-lamp&delta=-1").await;
    assert!(resp.body.contains("$45.25"));
    assert!(!resp.body.contains("cart-notification show"));

    let resp = client.post_form("/cart/update", "id=desk-lamp&delta=-1").await;
    assert!(resp.body.contains("Your cart is empty"));
    assert!(resp.body.contains("Item removed from cart"));
}

#[tokio::test]
async fn test_remove_clears_item() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", &add_form("Desk Lamp", "$45.25")).await;
    client.post_form("/cart/add", &add_form("Running Shoes", "$120.00")).await;

    let resp = client.post_form("/cart/remove", "id=desk-lamp").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Item removed from cart"));
    assert!(!resp.body.contains("data-id=\"desk-lamp\""));
    assert!(resp.body.contains("data-id=\"running-shoes\""));
    assert!(resp.body.contains("$129.60"));
}

#[tokio::test]
async fn test_unknown_id_is_a_quiet_no_op() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", &add_form("Desk Lamp", "$45.25")).await;

    let removed = client.post_form("/cart/remove", "id=nonexistent").await;
    assert_eq!(removed.status, StatusCode::OK);
    assert!(!removed.body.contains("Item removed from cart"));

    let updated = client.post_form("/cart/update", "id=nonexistent&delta=5").await;
    assert_eq!(updated.status, StatusCode::OK);

    let items = client.get("/cart/items").await;
    assert_eq!(items.body.matches("class=\"cart-item\"").count(), 1);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let mut alice = TestClient::new();
    let mut bob = TestClient::new();

    alice.post_form("/cart/add", &add_form("Desk Lamp", "$45.25")).await;

    let items = bob.get("/cart/items").await;
    assert!(items.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_expired_fragments() {
    let mut client = TestClient::new();

    let button = client.get("/cart/add-button").await;
    assert!(button.body.contains("Add to Cart"));

    let toast = client
        .get("/notifications/3b241101-e2bb-4255-8caf-4136c566a962/dismiss")
        .await;
    assert_eq!(toast.status, StatusCode::OK);
    assert!(toast.body.contains("id=\"cart-notification\""));
    assert!(!toast.body.contains("Item added"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_adds_on_one_session_are_all_kept() {
    let mut client = TestClient::new();
    let form = add_form("Desk Lamp", "$45.25");
    client.post_form("/cart/add", &form).await;

    let statuses = client.post_form_concurrently("/cart/add", &form, 20).await;
    assert!(statuses.iter().all(|status| *status == StatusCode::OK));

    let expected = expected_cart("Desk Lamp", "45.25", 21);
    let count = client.get("/cart/count").await;
    assert!(count.body.contains(">21<"), "{}", count.body);

    let items = client.get("/cart/items").await;
    assert!(items.body.contains(&format_money(expected.total())));
}
