//! Email outbox domain types.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Delivery state of an outbox row.
///
/// Maps onto the `outbox_status` Postgres enum. `pending` rows are picked up
/// by the drain worker; `failed` rows have exhausted their attempts and are
/// never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "outbox_status", rename_all = "lowercase")]
pub enum OutboxStatus {
    Pending,
    Sent,
    Failed,
}

/// A queued confirmation email.
///
/// Inserted inside the checkout transaction, so a row exists if and only if
/// the order committed.
#[derive(Debug, Clone, FromRow)]
pub struct OutboxEmail {
    /// Outbox row ID.
    pub id: Uuid,
    /// Recipient address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
    /// HTML body.
    pub html_body: String,
    /// Delivery state.
    pub status: OutboxStatus,
    /// Send attempts so far (incremented when a batch claims the row).
    pub attempts: i32,
    /// Error message from the most recent failed attempt.
    pub last_error: Option<String>,
    /// When the row was enqueued.
    pub created_at: DateTime<Utc>,
    /// When delivery succeeded.
    pub sent_at: Option<DateTime<Utc>>,
}
