//! Integration tests for Orchard.
//!
//! Tests drive the full storefront router in-process with
//! `tower::ServiceExt::oneshot`, backed by the in-memory stores, so no
//! database or running server is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p orchard-integration-tests
//! ```

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use orchard_storefront::db::{MemoryCartStore, MemoryUserStore};
use orchard_storefront::routes;
use orchard_storefront::state::AppState;

/// Response bodies larger than this fail the test.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

/// The storefront router over fresh in-memory stores.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Build an app with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let state = AppState::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryCartStore::new()),
        );
        Self {
            router: routes::app(state),
        }
    }

    /// Send a request with an optional JSON body.
    ///
    /// Non-JSON response bodies are returned as a JSON string.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    #[allow(clippy::unwrap_used)]
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

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

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}
