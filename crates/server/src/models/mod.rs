//! Domain models for the SmartCart server.
//!
//! Row types that map 1:1 onto query results derive `sqlx::FromRow`; values
//! that need validation (parsed emails, status enums) are built from raw
//! columns inside the repositories.

pub mod cart;
pub mod order;
pub mod outbox;
pub mod product;

pub use cart::CartLine;
pub use order::PlacedOrder;
pub use outbox::{OutboxEmail, OutboxStatus};
pub use product::ProductSnapshot;
