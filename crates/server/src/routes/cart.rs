//! Cart route handlers.
//!
//! JSON API over the per-user cart. Every verb, including the mutations,
//! responds with the refreshed cart so clients re-render from one shape.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use smartcart_core::ProductId;

use crate::db::{CartRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::CartLine;
use crate::state::AppState;

/// Cart response, returned by every cart verb.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLine>,
}

/// Add-line request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLineRequest {
    pub product_id: ProductId,
    pub quantity: i32,
    #[serde(default)]
    pub size: Option<String>,
}

/// Update-line request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLineRequest {
    pub product_id: ProductId,
    pub quantity: i32,
    #[serde(default)]
    pub size: Option<String>,
}

/// Remove-line request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveLineRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub size: Option<String>,
}

/// Get the current user's cart.
///
/// GET /api/cart
///
/// # Errors
///
/// Returns `AppError::Database` if the cart cannot be read.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user_id): RequireUser,
) -> Result<Json<CartResponse>> {
    let items = CartRepository::new(state.pool())
        .lines_for_user(user_id)
        .await?;

    Ok(Json(CartResponse { items }))
}

/// Add a line to the cart, merging quantity into an existing
/// (product, size) line.
///
/// POST /api/cart
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a quantity below 1 or an unknown
/// product, `AppError::Database` for other failures.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user_id): RequireUser,
    Json(body): Json<AddLineRequest>,
) -> Result<Json<CartResponse>> {
    if body.quantity < 1 {
        return Err(AppError::BadRequest(format!(
            "Invalid quantity for product {}",
            body.product_id
        )));
    }
    let size = body.size.unwrap_or_default();

    let repo = CartRepository::new(state.pool());
    repo.add_line(user_id, body.product_id, &size, body.quantity)
        .await
        .map_err(|e| match e {
            // Unknown product surfaces as a client error, not a 500.
            RepositoryError::Conflict(msg) => AppError::BadRequest(msg),
            other => AppError::Database(other),
        })?;

    let items = repo.lines_for_user(user_id).await?;
    Ok(Json(CartResponse { items }))
}

/// Set a line's quantity.
///
/// PUT /api/cart
///
/// A line that does not exist is left alone; the refreshed cart comes back
/// either way.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a quantity below 1,
/// `AppError::Database` for other failures.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user_id): RequireUser,
    Json(body): Json<UpdateLineRequest>,
) -> Result<Json<CartResponse>> {
    if body.quantity < 1 {
        return Err(AppError::BadRequest(format!(
            "Invalid quantity for product {}",
            body.product_id
        )));
    }
    let size = body.size.unwrap_or_default();

    let repo = CartRepository::new(state.pool());
    repo.set_quantity(user_id, body.product_id, &size, body.quantity)
        .await?;

    let items = repo.lines_for_user(user_id).await?;
    Ok(Json(CartResponse { items }))
}

/// Remove a line from the cart.
///
/// DELETE /api/cart
///
/// # Errors
///
/// Returns `AppError::Database` if the delete or the re-read fails.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user_id): RequireUser,
    Json(body): Json<RemoveLineRequest>,
) -> Result<Json<CartResponse>> {
    let size = body.size.unwrap_or_default();

    let repo = CartRepository::new(state.pool());
    repo.remove_line(user_id, body.product_id, &size).await?;

    let items = repo.lines_for_user(user_id).await?;
    Ok(Json(CartResponse { items }))
}
