//! Checkout route handler.
//!
//! Thin HTTP shell over [`CheckoutService`]: decode the request, run the
//! checkout, wrap the receipt. All interesting failure modes live in
//! `CheckoutError` and map to responses in `AppError`.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::RequireUser;
use crate::services::CheckoutService;
use crate::services::checkout::{CheckoutReceipt, CheckoutRequest};
use crate::state::AppState;

/// Successful checkout response:
/// `{"success": true, "orderId": …, "orderDate": …, "newBalance": …}`.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    #[serde(flatten)]
    pub receipt: CheckoutReceipt,
}

/// Place an order from the posted cart lines.
///
/// POST /api/checkout
///
/// # Errors
///
/// Returns 400 with the failure message for validation, funds, and stock
/// rejections; 500 for database failures (the transaction has rolled back).
#[instrument(skip(state, body))]
pub async fn place_order(
    State(state): State<AppState>,
    RequireUser(user_id): RequireUser,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let item_count = body.items.len().to_string();
    add_breadcrumb(
        "checkout",
        "Placing order",
        Some(&[("item_count", &item_count)]),
    );

    let service = CheckoutService::new(state.pool(), &state.config().base_url);
    let receipt = service.checkout(user_id, &body).await?;

    Ok(Json(CheckoutResponse {
        success: true,
        receipt,
    }))
}
