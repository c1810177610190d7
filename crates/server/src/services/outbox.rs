//! Outbox drain worker.
//!
//! Scans the email outbox on a fixed interval and delivers pending rows
//! over SMTP. Runs as a detached tokio task; nothing on this path can
//! surface to a checkout caller, and rows survive process restarts.

use std::time::Duration;

use sqlx::PgPool;

use crate::config::OutboxConfig;
use crate::db::OutboxRepository;
use crate::services::mailer::Mailer;

/// Claims a row may burn before it flips to `failed` and stops retrying.
const MAX_ATTEMPTS: i32 = 3;

/// Background worker that drains the email outbox.
pub struct OutboxWorker {
    pool: PgPool,
    mailer: Mailer,
    config: OutboxConfig,
}

impl OutboxWorker {
    /// Create a new worker.
    #[must_use]
    pub const fn new(pool: PgPool, mailer: Mailer, config: OutboxConfig) -> Self {
        Self {
            pool,
            mailer,
            config,
        }
    }

    /// Run the drain loop until the process exits.
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.config.scan_interval_secs,
            batch_size = self.config.batch_size,
            "outbox worker started"
        );

        let mut scan_interval =
            tokio::time::interval(Duration::from_secs(self.config.scan_interval_secs));

        loop {
            scan_interval.tick().await;
            self.drain_due().await;
        }
    }

    /// One drain pass: claim a batch, send each claimed email, record the
    /// outcome. Every failure is logged and contained to its row.
    async fn drain_due(&self) {
        let outbox = OutboxRepository::new(&self.pool);

        let batch = match outbox.due_batch(self.config.batch_size).await {
            Ok(batch) => batch,
            Err(e) => {
                tracing::error!(error = %e, "failed to claim outbox batch");
                return;
            }
        };

        if batch.is_empty() {
            return;
        }

        tracing::info!(count = batch.len(), "draining email outbox");

        for email in batch {
            match self.mailer.deliver(&email).await {
                Ok(()) => {
                    if let Err(e) = outbox.mark_sent(email.id).await {
                        tracing::error!(id = %email.id, error = %e, "failed to mark email sent");
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        id = %email.id,
                        attempts = email.attempts,
                        error = %e,
                        "email delivery failed"
                    );
                    if let Err(mark_err) = outbox
                        .mark_attempt_failed(email.id, &e.to_string(), MAX_ATTEMPTS)
                        .await
                    {
                        tracing::error!(
                            id = %email.id,
                            error = %mark_err,
                            "failed to record delivery failure"
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_budget() {
        // attempts increments when a batch claims the row, so the row flips
        // to failed on its MAX_ATTEMPTS-th failed claim and is never
        // delivered twice under the same budget.
        assert_eq!(MAX_ATTEMPTS, 3);
        assert!(MAX_ATTEMPTS >= 1);
    }
}
