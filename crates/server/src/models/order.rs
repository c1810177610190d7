//! Order domain types.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use smartcart_core::OrderId;

/// The identifying slice of a freshly inserted order header.
///
/// Returned by the order insert's `RETURNING` clause; both values come from
/// the database, not the application clock.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct PlacedOrder {
    /// Assigned order ID.
    pub order_id: OrderId,
    /// Database-side creation timestamp.
    pub order_date: DateTime<Utc>,
}
