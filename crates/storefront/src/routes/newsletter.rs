//! Newsletter subscription route handlers.
//!
//! This is a demo form: addresses are validated but not stored anywhere.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::IntoResponse};
use serde::Deserialize;
use shophub_core::Email;
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::notifications::{SUBSCRIBE_BUTTON_RESET_AFTER, ScheduledSwap};

/// URL serving the idle form, used for the initial load and the reset.
pub const FORM_URL: &str = "/newsletter/form";

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
}

/// The subscribe form in one of its states (HTMX fragment).
#[derive(Default, Template, WebTemplate)]
#[template(path = "partials/newsletter_form.html")]
pub struct NewsletterFormTemplate {
    pub email: String,
    /// Set after a successful subscription; swaps the idle form back in.
    pub subscribed: Option<ScheduledSwap>,
    pub error: Option<String>,
}

impl NewsletterFormTemplate {
    fn subscribed() -> Self {
        Self {
            subscribed: Some(ScheduledSwap::new(FORM_URL, SUBSCRIBE_BUTTON_RESET_AFTER)),
            ..Self::default()
        }
    }

    fn invalid(email: String) -> Self {
        Self {
            email,
            error: Some("Please enter a valid email address.".to_string()),
            ..Self::default()
        }
    }
}

/// Idle subscribe form.
pub async fn form() -> impl IntoResponse {
    NewsletterFormTemplate::default()
}

/// Subscribe to the newsletter (HTMX).
#[instrument(skip(form))]
pub async fn subscribe(Form(form): Form<SubscribeForm>) -> impl IntoResponse {
    let input = form.email.trim();
    if input.is_empty() {
        return NewsletterFormTemplate::default();
    }

    match Email::parse(input) {
        Ok(email) => {
            add_breadcrumb("newsletter", "Subscribed", &[("domain", email.domain())]);
            tracing::info!(domain = %email.domain(), "Newsletter subscription accepted");
            NewsletterFormTemplate::subscribed()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected newsletter address");
            NewsletterFormTemplate::invalid(input.to_string())
        }
    }
}
