//! Inventory repository: guarded stock decrements.
//!
//! Both decrement paths are single relative updates with the stock guard in
//! the `WHERE` clause, so they are safe under concurrent checkouts without a
//! prior read. Zero rows affected means the stock would have gone negative
//! (or, for sized products, the size row does not exist); the `>= 0` check
//! constraints are the backstop.

use sqlx::{Postgres, Transaction};

use smartcart_core::ProductId;

use super::RepositoryError;

/// Repository for stock decrements. All operations are transaction-scoped
/// because stock only moves inside a checkout.
pub struct InventoryRepository;

impl InventoryRepository {
    /// Decrement stock for one checkout line.
    ///
    /// Sized lines (`size` non-empty) decrement the matching `product_sizes`
    /// row; unsized lines decrement `products.stock_qty`. Returns `false`
    /// when no row could be decremented, which the caller rejects as
    /// out-of-stock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn decrement(
        tx: &mut Transaction<'_, Postgres>,
        product_id: ProductId,
        size: &str,
        quantity: i32,
    ) -> Result<bool, RepositoryError> {
        let result = if size.is_empty() {
            sqlx::query(
                r"
                UPDATE products
                SET stock_qty = stock_qty - $2
                WHERE product_id = $1
                  AND stock_qty >= $2
                ",
            )
            .bind(product_id)
            .bind(quantity)
            .execute(&mut **tx)
            .await?
        } else {
            sqlx::query(
                r"
                UPDATE product_sizes
                SET stock = stock - $3
                WHERE product_id = $1
                  AND size = $2
                  AND stock >= $3
                ",
            )
            .bind(product_id)
            .bind(size)
            .bind(quantity)
            .execute(&mut **tx)
            .await?
        };

        Ok(result.rows_affected() > 0)
    }
}
