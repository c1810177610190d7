//! Product domain types.

use rust_decimal::Decimal;
use sqlx::FromRow;

use smartcart_core::{ProductId, UserId};

/// Point-in-time view of a product as seen by checkout.
///
/// Captured by one batched catalog read before the transaction opens; the
/// price here is frozen into the order line.
#[derive(Debug, Clone, FromRow)]
pub struct ProductSnapshot {
    /// Product ID.
    pub id: ProductId,
    /// Product name (copied into the confirmation email).
    pub name: String,
    /// Current list price.
    pub price: Decimal,
    /// Seller who receives the credit for this product.
    pub seller_id: UserId,
}
