//! User repository for database operations.
//!
//! Resolves the confirmation recipient for a buyer. Balance reads and
//! adjustments live in [`ledger`](super::ledger); nothing here takes row
//! locks.

use sqlx::PgPool;

use smartcart_core::{Email, UserId};

use super::RepositoryError;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a user's email address, the only contact field checkout
    /// needs. `None` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored address no
    /// longer parses.
    pub async fn contact_email(&self, id: UserId) -> Result<Option<Email>, RepositoryError> {
        let raw: Option<String> = sqlx::query_scalar(
            r"
            SELECT email
            FROM users
            WHERE user_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        raw.map(|email| {
            Email::parse(&email).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
            })
        })
        .transpose()
    }
}
