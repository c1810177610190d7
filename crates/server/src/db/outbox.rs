//! Database operations for the email outbox (confirmation-email queue).
//!
//! Enqueue happens inside the checkout transaction; every other operation
//! belongs to the drain worker. Claiming increments `attempts` up front, so
//! a crash between claim and send still counts against the row.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::RepositoryError;
use crate::models::OutboxEmail;

/// Parameters for enqueuing a confirmation email.
pub struct NewOutboxEmail {
    /// Recipient address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
    /// HTML body.
    pub html_body: String,
}

/// Repository for the `email_outbox` table.
pub struct OutboxRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OutboxRepository<'a> {
    /// Create a new outbox repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Enqueue an email inside the caller's transaction.
    ///
    /// The row becomes visible to the drain worker only when the
    /// transaction commits, which ties the notification to the order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn enqueue(
        tx: &mut Transaction<'_, Postgres>,
        email: NewOutboxEmail,
    ) -> Result<Uuid, RepositoryError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r"
            INSERT INTO email_outbox (recipient, subject, text_body, html_body)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(email.recipient)
        .bind(email.subject)
        .bind(email.text_body)
        .bind(email.html_body)
        .fetch_one(&mut **tx)
        .await?;

        Ok(id)
    }

    /// Claim a batch of due pending emails, oldest first.
    ///
    /// `FOR UPDATE SKIP LOCKED` keeps concurrent workers off each other's
    /// rows; the claim itself bumps `attempts` so a delivery that never
    /// reports back is still bounded by the attempt limit.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn due_batch(&self, limit: i64) -> Result<Vec<OutboxEmail>, RepositoryError> {
        let batch = sqlx::query_as::<_, OutboxEmail>(
            r"
            UPDATE email_outbox
            SET attempts = attempts + 1
            WHERE id IN (
                SELECT id FROM email_outbox
                WHERE status = 'pending'
                ORDER BY created_at
                LIMIT $1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING id, recipient, subject, text_body, html_body,
                      status, attempts, last_error, created_at, sent_at
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(batch)
    }

    /// Mark a claimed email as delivered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_sent(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            UPDATE email_outbox
            SET status = 'sent', sent_at = NOW(), last_error = NULL
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Record a failed delivery attempt.
    ///
    /// The row stays `pending` until it has burned `max_attempts` claims,
    /// then flips to `failed` and is never picked up again.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_attempt_failed(
        &self,
        id: Uuid,
        error: &str,
        max_attempts: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            UPDATE email_outbox
            SET last_error = $2,
                status = CASE
                    WHEN attempts >= $3 THEN 'failed'::outbox_status
                    ELSE 'pending'::outbox_status
                END
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(error)
        .bind(max_attempts)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
