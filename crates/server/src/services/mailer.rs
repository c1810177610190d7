//! SMTP delivery for rendered outbox rows.
//!
//! Bodies are rendered at checkout time and frozen into the outbox, so the
//! mailer's whole job is turning a claimed row into a multipart message and
//! handing it to the relay.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::SmtpConfig;
use crate::models::OutboxEmail;

/// Delivery failures. The worker stores the Display form in the row's
/// `last_error` column.
#[derive(Debug, Error)]
pub enum MailerError {
    /// The relay rejected the connection or the message.
    #[error("smtp transport: {0}")]
    Smtp(#[from] SmtpError),

    /// The message could not be assembled.
    #[error("message assembly: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// An address did not parse as a mailbox.
    #[error("bad mailbox address: {0}")]
    BadAddress(String),
}

/// Async SMTP client with a fixed sender mailbox.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    /// Build the relay transport and parse the sender address.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay host is unusable or the configured
    /// from-address is not a valid mailbox.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailerError> {
        let from = config
            .from_address
            .parse()
            .map_err(|_| MailerError::BadAddress(config.from_address.clone()))?;

        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self { transport, from })
    }

    /// Deliver one outbox row as a plain-text + HTML alternative message.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipient does not parse, the message cannot
    /// be assembled, or the relay refuses it.
    pub async fn deliver(&self, email: &OutboxEmail) -> Result<(), MailerError> {
        let to: Mailbox = email
            .recipient
            .parse()
            .map_err(|_| MailerError::BadAddress(email.recipient.clone()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))?;

        self.transport.send(message).await?;

        tracing::info!(id = %email.id, to = %email.recipient, "confirmation email delivered");
        Ok(())
    }
}
