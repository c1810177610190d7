//! Order repository: append-only order headers and line items.
//!
//! This core only ever inserts. Status transitions past `PLACED` belong to
//! fulfillment systems that do not exist here.

use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};

use smartcart_core::{OrderId, OrderStatus, PaymentStatus, ProductId, UserId};

use super::RepositoryError;
use crate::models::PlacedOrder;

/// Repository for order writes. All operations are transaction-scoped; an
/// order header must never commit without its items.
pub struct OrderRepository;

impl OrderRepository {
    /// Insert the order header and return its assigned id and timestamp.
    ///
    /// The order is created as `PLACED` / `PAID`; payment is settled against
    /// the internal ledger in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_order(
        tx: &mut Transaction<'_, Postgres>,
        buyer_id: UserId,
        total: Decimal,
        shipping_address: &str,
    ) -> Result<PlacedOrder, RepositoryError> {
        let placed = sqlx::query_as::<_, PlacedOrder>(
            r"
            INSERT INTO orders (user_id, status, total_amount, shipping_address, payment_status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING order_id, order_date
            ",
        )
        .bind(buyer_id)
        .bind(OrderStatus::Placed.as_str())
        .bind(total)
        .bind(shipping_address)
        .bind(PaymentStatus::Paid.as_str())
        .fetch_one(&mut **tx)
        .await?;

        Ok(placed)
    }

    /// Insert one line item with its frozen unit price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add_order_item(
        tx: &mut Transaction<'_, Postgres>,
        order_id: OrderId,
        product_id: ProductId,
        quantity: i32,
        price: Decimal,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO order_items (order_id, product_id, quantity, price)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(price)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
