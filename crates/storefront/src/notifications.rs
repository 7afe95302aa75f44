//! Transient toast notifications and delayed UI resets.
//!
//! There is a single toast slot (`#cart-notification`) on the page. Each
//! toast is swapped into that slot out-of-band and carries an
//! `hx-trigger="load delay:..."` request that swaps the empty slot back in.
//! A newer toast replaces the element, which drops the older element's
//! pending dismiss request, so stale timers never clear a fresh message.
//!
//! Button label resets ("Added!", "Subscribed!") follow the same pattern via
//! [`ScheduledSwap`].

use std::time::Duration;

use askama::Template;
use askama_web::WebTemplate;
use uuid::Uuid;

/// How long a toast stays visible.
pub const TOAST_DISMISS_AFTER: Duration = Duration::from_millis(2000);

/// How long the add-to-cart button shows "Added!".
pub const ADD_BUTTON_RESET_AFTER: Duration = Duration::from_millis(1500);

/// How long the newsletter button shows "Subscribed!".
pub const SUBSCRIBE_BUTTON_RESET_AFTER: Duration = Duration::from_millis(3000);

/// Message shown after an item is added.
pub const ITEM_ADDED: &str = "Item added to cart!";

/// Message shown after an item is removed.
pub const ITEM_REMOVED: &str = "Item removed from cart";

/// A toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub dismiss_after: Duration,
}

impl Notification {
    /// Create a toast with the default dismiss delay.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            dismiss_after: TOAST_DISMISS_AFTER,
        }
    }

    #[must_use]
    pub fn item_added() -> Self {
        Self::new(ITEM_ADDED)
    }

    #[must_use]
    pub fn item_removed() -> Self {
        Self::new(ITEM_REMOVED)
    }

    /// Rendered markup for the out-of-band toast slot.
    #[must_use]
    pub fn template(&self) -> ToastTemplate {
        ToastTemplate {
            toast: Some(ToastView {
                id: self.id.to_string(),
                message: self.message.clone(),
                swap: ScheduledSwap::new(
                    format!("/notifications/{}/dismiss", self.id),
                    self.dismiss_after,
                ),
            }),
            oob: true,
        }
    }
}

/// A request the browser issues once, `delay` after the element loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledSwap {
    pub url: String,
    pub delay: Duration,
}

impl ScheduledSwap {
    #[must_use]
    pub fn new(url: impl Into<String>, delay: Duration) -> Self {
        Self {
            url: url.into(),
            delay,
        }
    }

    /// Value for the element's `hx-trigger` attribute.
    #[must_use]
    pub fn trigger(&self) -> String {
        format!("load delay:{}ms", self.delay.as_millis())
    }
}

/// Toast display data for templates.
#[derive(Debug, Clone)]
pub struct ToastView {
    pub id: String,
    pub message: String,
    pub swap: ScheduledSwap,
}

/// Toast slot fragment. `toast: None` renders the empty slot.
#[derive(Template, WebTemplate)]
#[template(path = "partials/toast.html")]
pub struct ToastTemplate {
    pub toast: Option<ToastView>,
    pub oob: bool,
}

impl ToastTemplate {
    /// The empty slot, swapped in when a toast is dismissed.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            toast: None,
            oob: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_defaults() {
        let toast = Notification::item_added();
        assert_eq!(toast.message, "Item added to cart!");
        assert_eq!(toast.dismiss_after, Duration::from_millis(2000));
        assert_eq!(Notification::item_removed().message, "Item removed from cart");
    }

    #[test]
    fn test_notifications_get_distinct_ids() {
        assert_ne!(Notification::item_added().id, Notification::item_added().id);
    }

    #[test]
    fn test_scheduled_swap_trigger() {
        let swap = ScheduledSwap::new("/cart/add-button", ADD_BUTTON_RESET_AFTER);
        assert_eq!(swap.trigger(), "load delay:1500ms");
    }

    #[test]
    fn test_toast_renders_dismiss_request() {
        let toast = Notification::item_removed();
        let html = toast.template().render().unwrap();

        assert!(html.contains("Item removed from cart"));
        assert!(html.contains(&format!("/notifications/{}/dismiss", toast.id)));
        assert!(html.contains("load delay:2000ms"));
        assert!(html.contains("hx-swap-oob"));
    }

    #[test]
    fn test_empty_slot_has_no_message() {
        let html = ToastTemplate::empty().render().unwrap();
        assert!(html.contains("cart-notification"));
        assert!(!html.contains("hx-trigger"));
        assert!(!html.contains("hx-swap-oob"));
    }
}
