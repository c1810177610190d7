//! HTTP middleware and extractors.
//!
//! The API trusts an upstream gateway to authenticate users and forward the
//! caller's identity in the `x-user-id` header; [`auth::RequireUser`] turns
//! that header into a typed [`smartcart_core::UserId`] or a 401.

pub mod auth;

pub use auth::{RequireUser, USER_ID_HEADER};
