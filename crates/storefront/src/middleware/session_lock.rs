//! Per-session serialization of state-changing requests.
//!
//! Each request loads the session record, changes it and saves it back when
//! the response is produced. Two overlapping requests from one browser would
//! both start from the same record and the later save would discard the
//! earlier change. This middleware sits outside the session layer and holds
//! a per-cookie lock until that save has happened, so mutations on one
//! session run one after another. Requests from different sessions, reads,
//! and requests without a session cookie are not serialized.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, header::COOKIE},
    middleware::Next,
    response::Response,
};
use moka::future::Cache;
use tokio::sync::Mutex;
use tower_sessions::cookie::Cookie;

use super::session::{MAX_SESSIONS, SESSION_COOKIE_NAME};
use crate::state::AppState;

/// How long an unused lock is kept around.
const LOCK_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Locks keyed by session cookie value.
#[derive(Clone)]
pub struct SessionLocks {
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl SessionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: Cache::builder()
                .max_capacity(MAX_SESSIONS)
                .time_to_idle(LOCK_IDLE_TIMEOUT)
                .build(),
        }
    }

    /// The lock for `session`, created on first use.
    pub async fn lock_for(&self, session: &str) -> Arc<Mutex<()>> {
        self.locks
            .get_with(session.to_string(), async { Arc::new(Mutex::new(())) })
            .await
    }
}

impl Default for SessionLocks {
    fn default() -> Self {
        Self::new()
    }
}

/// Value of the session cookie sent with the request, if any.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

/// Run state-changing requests for one session one at a time.
pub async fn session_lock_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::GET || request.method() == Method::HEAD {
        return next.run(request).await;
    }
    let Some(session) = session_cookie(request.headers()) else {
        return next.run(request).await;
    };

    let lock = state.session_locks().lock_for(&session).await;
    let _guard = lock.lock().await;
    next.run(request).await
}
