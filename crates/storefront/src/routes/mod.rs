//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Liveness check
//! GET  /health/ready                        - Readiness check (catalog loaded)
//!
//! # Catalog
//! GET  /api/categories                      - Category listing
//! GET  /api/categories/{slug}               - Category by slug
//! GET  /api/medicines?categoryId&search&limit - Medicine listing
//! GET  /api/medicines/{id}                  - Medicine detail with reviews
//!
//! # Reviews
//! GET  /api/medicines/{id}/reviews          - Reviews of a medicine
//! POST /api/medicines/{id}/reviews          - Submit a review
//! GET  /api/medicines/{id}/reviews/summary  - Star distribution
//!
//! # Cart (scoped by x-session-id)
//! GET    /api/cart                          - Cart lines
//! POST   /api/cart                          - Add to cart
//! DELETE /api/cart                          - Clear cart
//! GET    /api/cart/summary                  - Cart totals
//! PUT    /api/cart/{medicineId}             - Set quantity (0 removes)
//! DELETE /api/cart/{medicineId}             - Remove line
//! ```

pub mod cart;
pub mod categories;
pub mod health;
pub mod medicines;
pub mod reviews;

use axum::{
    Router,
    routing::{get, put},
};
use serde::Serialize;

use crate::state::AppState;

/// `{ "message": "..." }` body for operations with nothing else to return.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{slug}", get(categories::show))
}

/// Create the medicine and review routes router.
pub fn medicine_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(medicines::index))
        .route("/{id}", get(medicines::show))
        .route("/{id}/reviews", get(reviews::index).post(reviews::create))
        .route("/{id}/reviews/summary", get(reviews::summary))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).post(cart::add).delete(cart::clear))
        .route("/summary", get(cart::summary))
        .route("/{medicine_id}", put(cart::update).delete(cart::remove))
}

/// Create the JSON API router (mounted at `/api`).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category_routes())
        .nest("/medicines", medicine_routes())
        .nest("/cart", cart_routes())
}

/// Create the health check routes router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::health))
        .route("/ready", get(health::readiness))
}
