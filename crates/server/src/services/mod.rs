//! Business-logic services for the SmartCart server.

pub mod checkout;
pub mod confirmation;
pub mod mailer;
pub mod outbox;

pub use checkout::CheckoutService;
pub use mailer::Mailer;
pub use outbox::OutboxWorker;
