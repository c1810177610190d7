//! HTTP route handlers for the checkout API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check (wired in main)
//! GET  /health/ready           - Readiness check (wired in main)
//!
//! # Cart
//! GET    /api/cart             - Current user's cart lines
//! POST   /api/cart             - Add a line (merges quantity)
//! PUT    /api/cart             - Set a line's quantity
//! DELETE /api/cart             - Remove a line
//!
//! # Checkout
//! POST /api/checkout           - Place an order from the posted lines
//!
//! # Users
//! GET  /api/users/{id}/balance - Account balance
//! ```
//!
//! All bodies are JSON with camelCase keys. Identity comes from the
//! `x-user-id` header via [`crate::middleware::RequireUser`].

pub mod cart;
pub mod checkout;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(cart::show)
            .post(cart::add)
            .put(cart::update)
            .delete(cart::remove),
    )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Cart routes
        .nest("/api/cart", cart_routes())
        // Checkout
        .route("/api/checkout", post(checkout::place_order))
        // Balance lookup
        .route("/api/users/{id}/balance", get(users::balance))
}
