//! `ShopHub` storefront library.
//!
//! A demo shop whose cart lives in the visitor's session. Pages are rendered
//! server-side with Askama; HTMX swaps fragments in place and out-of-band so
//! the badge, the cart list and the toast stay in step after every change.
//!
//! The binary only loads configuration and serves [`app`]; keeping the
//! router here lets the integration tests drive it in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod nav;
pub mod notifications;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

use axum::{Router, http::Request, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::cookie::KeyError;

use crate::error::AppError;
use crate::state::AppState;

/// Build the storefront router with its full middleware stack.
///
/// # Errors
///
/// Returns an error if the session secret cannot be used as a signing key.
pub fn app(state: AppState) -> Result<Router, KeyError> {
    let session_layer = middleware::create_session_layer(state.config())?;
    let static_files = ServeDir::new(&state.config().static_dir);

    Ok(Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", static_files)
        .fallback(not_found)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(session_layer)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_lock_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction()))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> AppError {
    AppError::NotFound("page".to_string())
}
