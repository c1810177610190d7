//! Integration tests for SmartCart.
//!
//! # Running Tests
//!
//! The contract and planning tests need nothing running:
//!
//! ```bash
//! cargo test -p smartcart-integration-tests
//! ```
//!
//! The checkout flow tests talk to a live server over HTTP and are marked
//! `#[ignore]`. Start Postgres, migrate, seed, run the server, then opt in:
//!
//! ```bash
//! cargo run -p smartcart-cli -- migrate
//! cargo run -p smartcart-cli -- seed
//! cargo run -p smartcart-server &
//! cargo test -p smartcart-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `checkout_plan` - Settlement arithmetic against the planning phase
//! - `http_contract` - Response status codes and JSON body shapes
//! - `checkout_flow` - Live HTTP tests against a seeded server

use reqwest::header::{HeaderMap, HeaderValue};

use smartcart_server::middleware::USER_ID_HEADER;

/// Base URL of the server under test.
///
/// Reads `SMARTCART_TEST_BASE_URL`, defaulting to the local dev address.
#[must_use]
pub fn base_url() -> String {
    std::env::var("SMARTCART_TEST_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Connection string for direct database assertions.
///
/// Stock has no read endpoint, so the flow tests check decrements against
/// the database itself. Loads `.env` first and reads
/// `SMARTCART_DATABASE_URL` with the same `DATABASE_URL` fallback the
/// server uses.
///
/// # Panics
///
/// Panics if neither variable is set; acceptable in test support.
#[must_use]
pub fn database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("SMARTCART_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("SMARTCART_DATABASE_URL or DATABASE_URL must be set")
}

/// A client whose requests carry the `x-user-id` header the gateway would
/// normally inject.
///
/// # Panics
///
/// Panics if the client cannot be constructed; acceptable in test support.
#[must_use]
pub fn client_for_user(user_id: i32) -> reqwest::Client {
    let mut headers = HeaderMap::new();
    let value =
        HeaderValue::from_str(&user_id.to_string()).expect("user id is a valid header value");
    headers.insert(USER_ID_HEADER, value);
    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .expect("Failed to build HTTP client")
}

/// A client with no identity header, for unauthenticated requests.
///
/// # Panics
///
/// Panics if the client cannot be constructed; acceptable in test support.
#[must_use]
pub fn anonymous_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("Failed to build HTTP client")
}
