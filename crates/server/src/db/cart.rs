//! Cart repository for database operations.
//!
//! One cart per user, created lazily on first add. Lines are keyed by
//! (product, size) with `size` normalized to the empty string for unsized
//! products before it reaches this layer.

use sqlx::{PgPool, Postgres, Transaction};

use smartcart_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::CartLine;

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All cart lines for a user, joined with the product's name and live
    /// price. A user without a cart reads as an empty list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(
            r"
            SELECT ci.product_id, ci.size, ci.quantity, p.name, p.price
            FROM cart_items ci
            JOIN carts c ON ci.cart_id = c.cart_id
            JOIN products p ON p.product_id = ci.product_id
            WHERE c.user_id = $1
            ORDER BY ci.cart_item_id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// Add quantity to a (product, size) line, creating the cart and the
    /// line as needed. An existing line merges quantities.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_line(
        &self,
        user_id: UserId,
        product_id: ProductId,
        size: &str,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO carts (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        sqlx::query(
            r"
            INSERT INTO cart_items (cart_id, product_id, size, quantity)
            VALUES ((SELECT cart_id FROM carts WHERE user_id = $1), $2, $3, $4)
            ON CONFLICT (cart_id, product_id, size)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(size)
        .bind(quantity)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict(format!("Invalid product {product_id}"));
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Set the quantity of an existing (product, size) line.
    ///
    /// A line that does not exist is left alone; callers return the
    /// refreshed cart either way.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_quantity(
        &self,
        user_id: UserId,
        product_id: ProductId,
        size: &str,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            UPDATE cart_items
            SET quantity = $4
            WHERE cart_id = (SELECT cart_id FROM carts WHERE user_id = $1)
              AND product_id = $2
              AND size = $3
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(size)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Remove one (product, size) line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove_line(
        &self,
        user_id: UserId,
        product_id: ProductId,
        size: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM cart_items
            WHERE cart_id = (SELECT cart_id FROM carts WHERE user_id = $1)
              AND product_id = $2
              AND size = $3
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(size)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete every line in the user's cart, inside the caller's
    /// transaction. Checkout calls this so the clear commits or rolls back
    /// with the order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM cart_items
            WHERE cart_id = (SELECT cart_id FROM carts WHERE user_id = $1)
            ",
        )
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
