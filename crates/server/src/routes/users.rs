//! User route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use smartcart_core::UserId;

use crate::db::LedgerRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Balance response.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: Decimal,
}

/// Get a user's account balance.
///
/// GET /api/users/{id}/balance
///
/// Unauthenticated by contract; the id is the lookup key, not the caller.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown user.
#[instrument(skip(state))]
pub async fn balance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BalanceResponse>> {
    let balance = LedgerRepository::new(state.pool())
        .read(UserId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(BalanceResponse { balance }))
}
