//! Integration tests for `HealWell` Mart.
//!
//! Tests drive the real storefront router in-process with
//! `tower::ServiceExt::oneshot`; no listener or external service is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p healwell-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Categories, medicines, health checks
//! - `storefront_cart` - Session carts
//! - `storefront_reviews` - Review submission and rating aggregates

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use healwell_storefront::config::StorefrontConfig;
use healwell_storefront::db::Database;
use healwell_storefront::middleware::SESSION_ID_HEADER;
use healwell_storefront::state::AppState;

/// A response with its body parsed as JSON (`Value::Null` when empty or not JSON).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// A storefront router over its own store.
///
/// Clones share the store, so two clones with different sessions see the
/// same catalog but separate carts.
#[derive(Clone)]
pub struct TestContext {
    router: Router,
    session: Option<String>,
}

impl TestContext {
    /// Router over the built-in demo catalog.
    ///
    /// # Panics
    ///
    /// Panics if the built-in catalog is invalid.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_database(Database::seeded().expect("built-in catalog should load"))
    }

    /// Router over the given store.
    #[must_use]
    pub fn with_database(db: Database) -> Self {
        let state = AppState::new(StorefrontConfig::default(), db);
        Self {
            router: healwell_storefront::app(state),
            session: None,
        }
    }

    /// Send `x-session-id` on every following request.
    #[must_use]
    pub fn with_session(mut self, session: &str) -> Self {
        self.session = Some(session.to_string());
        self
    }

    /// Send a request with an optional JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    #[allow(clippy::expect_used)]
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(session) = &self.session {
            builder = builder.header(SESSION_ID_HEADER, session);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        self.send(request).await
    }

    /// Send a prepared request.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    #[allow(clippy::expect_used)]
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
