//! Integration tests for `ShopHub`.
//!
//! The storefront router is driven in-process with
//! [`tower::ServiceExt::oneshot`]; no server or network is involved.
//! [`TestClient`] plays the browser: it keeps the session cookie between
//! requests and sends the `HX-Request` header HTMX would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shophub-integration-tests
//! ```

use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use secrecy::SecretString;
use shophub_storefront::{
    app,
    config::{SentryConfig, StorefrontConfig},
    state::AppState,
};
use tower::ServiceExt;
use url::Url;

/// Signing secret for test sessions (long enough for a cookie key).
pub const TEST_SESSION_SECRET: &str =
    "t3st-Sess10n-Secr3t_qW8zR1vN6bY4uJ0kH5gF2dS9aL7pO3iU8yT6rE1wQ4mX2cV";

/// Body size limit when reading responses.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Storefront configuration for tests (plain HTTP, no Sentry).
///
/// # Panics
///
/// Never in practice; the base URL literal is valid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        base_url: Url::parse("http://localhost:3000").unwrap(),
        session_secret: SecretString::from(TEST_SESSION_SECRET),
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static")),
        sentry: SentryConfig::default(),
    }
}

/// A response with its body read to a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a response header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// An in-process browser with its own session.
///
/// Every client builds its own router, so sessions never leak between tests.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Create a client against a fresh storefront.
    ///
    /// # Panics
    ///
    /// Panics if the router cannot be built.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        Self {
            app: app(AppState::new(test_config())).unwrap(),
            cookie: None,
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Request::builder().method("GET").uri(uri), Body::empty())
            .await
    }

    /// Send a form-encoded POST request.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            Body::from(form.to_string()),
        )
        .await
    }

    /// Send the same form-encoded POST `times` times at once, all carrying
    /// this client's session cookie, and return the status codes.
    ///
    /// # Panics
    ///
    /// Panics if a spawned request task fails.
    #[allow(clippy::unwrap_used)]
    pub async fn post_form_concurrently(
        &self,
        uri: &str,
        form: &str,
        times: usize,
    ) -> Vec<StatusCode> {
        let tasks: Vec<_> = (0..times)
            .map(|_| {
                let app = self.app.clone();
                let request = self.request(
                    Request::builder()
                        .method("POST")
                        .uri(uri)
                        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
                    Body::from(form.to_string()),
                );
                tokio::spawn(async move { app.oneshot(request).await.unwrap().status() })
            })
            .collect();

        let mut statuses = Vec::with_capacity(times);
        for task in tasks {
            statuses.push(task.await.unwrap());
        }
        statuses
    }

    #[allow(clippy::unwrap_used)]
    fn request(&self, mut builder: axum::http::request::Builder, body: Body) -> Request<Body> {
        builder = builder.header("HX-Request", "true");
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(body).unwrap()
    }

    #[allow(clippy::unwrap_used)]
    async fn send(&mut self, builder: axum::http::request::Builder, body: Body) -> TestResponse {
        let request = self.request(builder, body);
        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Form body for adding a product the way a product card submits it.
#[must_use]
pub fn add_form(name: &str, price: &str) -> String {
    format!(
        "name={}&description=Test+product&price={}&image=%2Fimg.png",
        name.replace(' ', "+"),
        price.replace('$', "%24")
    )
}
