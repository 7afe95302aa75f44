//! Session middleware configuration.
//!
//! The cart lives in the session, and the session lives only as long as the
//! browser tab: the cookie has no expiry, so it is dropped when the browser
//! session ends. Records are kept in a bounded in-memory `moka` store that
//! evicts the least recently used sessions once full, and drops records
//! when their expiry passes.

use secrecy::ExposeSecret;
use tower_sessions::{
    Expiry, SessionManagerLayer,
    cookie::{Key, KeyError, SameSite},
    service::SignedCookie,
};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "shophub_session";

/// Most session records held in memory at once.
pub const MAX_SESSIONS: u64 = 10_000;

/// Session layer type used by the storefront router.
pub type StorefrontSessionLayer = SessionManagerLayer<MokaStore, SignedCookie>;

/// Create the session layer with a bounded in-memory store and a signed cookie.
///
/// # Errors
///
/// Returns an error if the session secret is too short to derive a signing
/// key from.
pub fn create_session_layer(config: &StorefrontConfig) -> Result<StorefrontSessionLayer, KeyError> {
    let key = Key::try_from(config.session_secret.expose_secret().as_bytes())?;

    Ok(SessionManagerLayer::new(MokaStore::new(Some(MAX_SESSIONS)))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
