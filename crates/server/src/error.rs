//! API error type and Sentry reporting helpers.
//!
//! Route handlers return `Result<T, AppError>`. Rendering an `AppError`
//! captures server-side failures to Sentry first, then answers the client
//! with an `{"error": "..."}` body. Internal failures collapse to
//! `Internal error` so database detail never leaks.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::checkout::CheckoutError;

/// Everything a route handler can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    /// A repository call failed outside checkout.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Checkout refused or aborted. Most variants carry the exact client
    /// message; `Repository` is masked as a 500.
    #[error("checkout failed: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// No usable identity on the request.
    #[error("not authenticated: {0}")]
    Unauthorized(String),

    /// The request itself is wrong.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Anything else. The message stays server-side.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Errors that should page us rather than blame the client.
    fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Checkout(CheckoutError::Repository(_))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "request failed");
        }

        let (status, message) = match &self {
            Self::Database(_)
            | Self::Internal(_)
            | Self::Checkout(CheckoutError::Repository(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
            Self::Checkout(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Attach the authenticated user to the Sentry scope so later errors on
/// this request carry their identity.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Record a user action as a Sentry breadcrumb.
///
/// Breadcrumbs show up on error reports as the trail leading to the
/// failure.
///
/// ```rust,ignore
/// add_breadcrumb("checkout", "Placing order", Some(&[("item_count", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        breadcrumb.data.extend(pairs.iter().map(|(key, value)| {
            (
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            )
        }));
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_display_keeps_the_inner_message() {
        let err = AppError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "not found: User not found");

        let err = AppError::BadRequest("Invalid quantity".to_string());
        assert_eq!(err.to_string(), "bad request: Invalid quantity");
    }

    #[test]
    fn test_status_codes_per_variant() {
        assert_eq!(
            status_of(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Unauthorized("x".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::BadRequest("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Internal("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_checkout_rejections_are_client_errors() {
        for err in [
            CheckoutError::EmptyCart,
            CheckoutError::MissingShippingField("phone"),
            CheckoutError::InsufficientFunds,
        ] {
            assert_eq!(status_of(AppError::from(err)), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_checkout_repository_failure_is_a_server_error() {
        let err = CheckoutError::Repository(RepositoryError::NotFound);
        assert!(AppError::from(err).is_server_error());

        let err = CheckoutError::Repository(RepositoryError::NotFound);
        assert_eq!(
            status_of(AppError::from(err)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
