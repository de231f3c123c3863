//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                         - Liveness check
//! GET    /health/ready                   - Readiness check (storage reachable)
//!
//! # Auth
//! POST   /auth/signup                    - Register an account
//! POST   /auth/signin                    - Sign in with email and password
//!
//! # Cart
//! GET    /cart/{cart_id}                 - List a cart's products
//! POST   /cart/{cart_id}                 - Add a product
//! PATCH  /cart/{cart_id}/{product_id}    - Change a product's quantity
//! DELETE /cart/{cart_id}/{product_id}    - Remove a product
//! ```

pub mod auth;
pub mod cart;
pub mod health;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{make_request_span, request_id_middleware};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/{cart_id}", get(cart::list).post(cart::add))
        .route(
            "/{cart_id}/{product_id}",
            patch(cart::update).delete(cart::remove),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/auth", auth_routes())
        .nest("/cart", cart_routes())
}

/// Build the full application with tracing and request IDs.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .with_state(state)
}
