//! Ledger repository: per-user balance reads and signed adjustments.
//!
//! Checkout serializes on these rows. Callers that lock more than one
//! principal must acquire the locks in ascending `UserId` order so that
//! overlapping checkouts cannot deadlock; [`crate::services::checkout`]
//! builds that order into its plan.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use smartcart_core::UserId;

use super::RepositoryError;

/// Repository for balance operations on the `users` table.
pub struct LedgerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LedgerRepository<'a> {
    /// Create a new ledger repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Plain balance read, no lock. Serves the balance endpoint.
    ///
    /// Returns `None` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn read(&self, user_id: UserId) -> Result<Option<Decimal>, RepositoryError> {
        let balance =
            sqlx::query_scalar::<_, Decimal>("SELECT balance FROM users WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(balance)
    }

    /// Read a balance while taking an exclusive row lock scoped to `tx`.
    ///
    /// The lock is held until the transaction commits or rolls back.
    /// Returns `None` when the principal does not exist (nothing is locked
    /// in that case).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn locked_read(
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
    ) -> Result<Option<Decimal>, RepositoryError> {
        let balance = sqlx::query_scalar::<_, Decimal>(
            "SELECT balance FROM users WHERE user_id = $1 FOR UPDATE",
        )
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(balance)
    }

    /// Apply a signed balance change and return the resulting balance.
    ///
    /// Debits pass a negative delta. The caller must already hold the row
    /// lock via [`Self::locked_read`]; the `balance >= 0` check constraint
    /// backstops any debit that slips past the sufficiency check.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails or the user
    /// row does not exist.
    pub async fn adjust(
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
        delta: Decimal,
    ) -> Result<Decimal, RepositoryError> {
        let balance = sqlx::query_scalar::<_, Decimal>(
            r"
            UPDATE users
            SET balance = balance + $2
            WHERE user_id = $1
            RETURNING balance
            ",
        )
        .bind(user_id)
        .bind(delta)
        .fetch_one(&mut **tx)
        .await?;

        Ok(balance)
    }
}
