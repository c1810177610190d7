//! Cart domain types.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use smartcart_core::ProductId;

/// One cart line joined with the product's name and live price.
///
/// Lines are keyed by (product, size); `size` is the empty string for
/// unsized products. Serializes with the camelCase keys the cart API
/// returns.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product in this line.
    pub product_id: ProductId,
    /// Selected size, empty for unsized products.
    pub size: String,
    /// Units of this (product, size).
    pub quantity: i32,
    /// Product name at read time.
    pub name: String,
    /// Live product price at read time. Checkout freezes its own copy.
    pub price: Decimal,
}
