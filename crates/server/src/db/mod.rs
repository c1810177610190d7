//! Database operations for the SmartCart `PostgreSQL`.
//!
//! ## Tables
//!
//! - `users` - Buyer/seller principals with their ledger balance
//! - `products` - Catalog entries owned by sellers (scalar stock)
//! - `product_sizes` - Per-size stock rows for sized products
//! - `carts` / `cart_items` - One cart per user, lines keyed by (product, size)
//! - `orders` / `order_items` - Append-only order history with frozen prices
//! - `email_outbox` - Durable confirmation-email queue
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p smartcart-cli -- migrate
//! ```
//!
//! All queries are runtime-checked (`sqlx::query` with explicit binds); row
//! types derive `sqlx::FromRow` in `crate::models`.

pub mod cart;
pub mod catalog;
pub mod inventory;
pub mod ledger;
pub mod orders;
pub mod outbox;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use cart::CartRepository;
pub use catalog::CatalogRepository;
pub use inventory::InventoryRepository;
pub use ledger::LedgerRepository;
pub use orders::OrderRepository;
pub use outbox::OutboxRepository;
pub use users::UserRepository;

/// Failure modes shared by every repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying sqlx call failed.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A stored row violates an invariant this code relies on.
    #[error("corrupt row: {0}")]
    DataCorruption(String),

    /// The requested row does not exist.
    #[error("row not found")]
    NotFound,

    /// A database constraint rejected the write.
    #[error("rejected write: {0}")]
    Conflict(String),
}

/// Open a `PostgreSQL` pool sized for a single small API process.
///
/// # Errors
///
/// Returns `sqlx::Error` when the initial connection cannot be made.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
