//! Mobile navigation toggle route handler.
//!
//! The browser reports what happened (and, when it matters, the viewport
//! width); the server applies the transition and answers with the new
//! navigation markup plus an out-of-band scroll-lock style.

use askama::Template;
use axum::{
    Form,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Deserializer};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::nav::{NavEffects, NavEvent, NavMenu};

/// Deserialize empty strings as None for optional numeric fields.
fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Kind of navigation event reported by the page.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NavEventKind {
    Toggle,
    LinkClicked,
    OutsideClick,
    Escape,
    Resized,
}

/// Navigation event form data.
#[derive(Debug, Deserialize)]
pub struct NavForm {
    /// Whether the menu was open when the event fired.
    #[serde(default)]
    pub open: bool,
    pub event: NavEventKind,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub width: Option<u32>,
}

impl NavForm {
    /// Convert to a [`NavEvent`].
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` if a width-dependent event arrives without one.
    pub fn event(&self) -> Result<NavEvent> {
        let width = || {
            self.width
                .ok_or_else(|| AppError::BadRequest("width is required".to_string()))
        };

        Ok(match self.event {
            NavEventKind::Toggle => NavEvent::Toggle,
            NavEventKind::OutsideClick => NavEvent::OutsideClick,
            NavEventKind::Escape => NavEvent::Escape,
            NavEventKind::LinkClicked => NavEvent::LinkClicked { width: width()? },
            NavEventKind::Resized => NavEvent::Resized { width: width()? },
        })
    }
}

/// Navigation markup (toggle button, links and open-state watchers).
#[derive(Template)]
#[template(path = "partials/nav.html")]
pub struct NavTemplate {
    pub nav: NavEffects,
}

/// Out-of-band `<style>` that locks body scrolling while the menu is open.
#[derive(Template)]
#[template(path = "partials/scroll_lock.html")]
pub struct ScrollLockTemplate {
    pub locked: bool,
}

/// Apply a navigation event.
#[instrument(skip(form), fields(event = ?form.event, open = form.open))]
pub async fn transition(Form(form): Form<NavForm>) -> Result<Response> {
    let mut menu = NavMenu::new(form.open);
    let nav = menu.apply(form.event()?);

    let mut html = NavTemplate { nav }.render()?;
    html.push_str(
        &ScrollLockTemplate {
            locked: nav.scroll_locked,
        }
        .render()?,
    );

    Ok(Html(html).into_response())
}
