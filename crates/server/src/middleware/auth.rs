//! Authentication extractor.
//!
//! Identity arrives pre-authenticated from the gateway as a numeric
//! `x-user-id` header. Handlers that act on behalf of a user take
//! [`RequireUser`] and get a typed id or a uniform 401.

use axum::{extract::FromRequestParts, http::request::Parts};

use smartcart_core::UserId;

use crate::error::{AppError, set_sentry_user};

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor that requires an authenticated user.
///
/// Rejects with `401 {"error": "Not authenticated"}` when the header is
/// missing, non-numeric, or not a positive id.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireUser(user_id): RequireUser,
/// ) -> impl IntoResponse {
///     format!("Hello, user {user_id}!")
/// }
/// ```
#[derive(Debug)]
pub struct RequireUser(pub UserId);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i32>().ok())
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

        let user_id = UserId::new(id);
        set_sentry_user(&user_id, None);

        Ok(Self(user_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(header: Option<&str>) -> Result<RequireUser, AppError> {
        let mut builder = Request::builder().uri("/api/cart");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        RequireUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_header_extracts_user_id() {
        let RequireUser(user_id) = extract(Some("42")).await.unwrap();
        assert_eq!(user_id, UserId::new(42));
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_is_tolerated() {
        let RequireUser(user_id) = extract(Some(" 7 ")).await.unwrap();
        assert_eq!(user_id, UserId::new(7));
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let err = extract(None).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(msg) if msg == "Not authenticated"));
    }

    #[tokio::test]
    async fn test_non_numeric_header_is_rejected() {
        let err = extract(Some("alice")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_non_positive_ids_are_rejected() {
        for bad in ["0", "-3"] {
            let err = extract(Some(bad)).await.unwrap_err();
            assert!(matches!(err, AppError::Unauthorized(_)));
        }
    }
}
