//! Checkout orchestration: plan, then execute atomically.
//!
//! A checkout splits into a pure planning phase and a transactional phase.
//! Planning validates the request, resolves prices from one catalog
//! snapshot, and fixes the settlement amounts and the principal lock order.
//! Execution replays the plan inside a single transaction: lock every
//! principal in ascending id order, check the buyer's balance from the
//! locked read, move the money, write the order, decrement stock, clear the
//! cart, and enqueue the confirmation email. Any error rolls the whole
//! transaction back.
//!
//! Locking all principals in one fixed ascending order is what lets two
//! overlapping checkouts serialize instead of deadlocking.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use thiserror::Error;

use smartcart_core::{Email, OrderId, ProductId, UserId};

use crate::db::outbox::NewOutboxEmail;
use crate::db::{
    CartRepository, CatalogRepository, InventoryRepository, LedgerRepository, OrderRepository,
    OutboxRepository, RepositoryError, UserRepository,
};
use crate::models::ProductSnapshot;
use crate::services::confirmation::{self, ConfirmationLine};

/// Errors produced by checkout. Display strings are the exact messages the
/// API returns for 400s.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The item list was missing or empty.
    #[error("Cart is empty")]
    EmptyCart,

    /// A required shipping field was absent or blank.
    #[error("Missing shipping.{0}")]
    MissingShippingField(&'static str),

    /// A line asked for fewer than one unit.
    #[error("Invalid quantity for product {0}")]
    InvalidQuantity(ProductId),

    /// A line referenced a product the catalog could not resolve.
    #[error("Invalid product {0}")]
    UnknownProduct(ProductId),

    /// The buyer's locked balance does not cover the total.
    #[error("Insufficient balance")]
    InsufficientFunds,

    /// A stock decrement would have crossed zero.
    #[error("Insufficient stock for product {product_id}")]
    OutOfStock {
        /// Product that could not be decremented.
        product_id: ProductId,
        /// Size of the rejected line, empty for unsized products.
        size: String,
    },

    /// Database failure; the transaction has been rolled back.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Checkout request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    /// Shipping record; missing maps to all-blank and fails validation.
    #[serde(default)]
    pub shipping: ShippingAddress,
    /// Cart lines to check out; missing maps to empty and fails validation.
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
}

/// Shipping record with the six required fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal: String,
    #[serde(default)]
    pub phone: String,
}

/// One requested line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    /// Product to buy.
    pub product_id: ProductId,
    /// Units requested, at least 1.
    pub quantity: i32,
    /// Selected size for sized products.
    #[serde(default)]
    pub size: Option<String>,
}

/// One priced line inside a [`CheckoutPlan`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedLine {
    pub product_id: ProductId,
    /// Product name at snapshot time, used in the confirmation email.
    pub name: String,
    /// Normalized size; empty string means unsized.
    pub size: String,
    pub quantity: i32,
    /// Unit price frozen from the snapshot.
    pub unit_price: Decimal,
    /// `unit_price * quantity`.
    pub line_total: Decimal,
}

/// The fixed outcome of the planning phase.
///
/// Everything the transactional phase needs is resolved here, so execution
/// never consults the live catalog again.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutPlan {
    pub buyer_id: UserId,
    /// Priced lines, ascending by (product, size). Stock rows are locked
    /// in this order during execution.
    pub lines: Vec<PlannedLine>,
    /// Grand total, equal to the sum of all line totals.
    pub total: Decimal,
    /// Aggregated credit per seller, ascending by seller id.
    pub seller_credits: Vec<(UserId, Decimal)>,
    /// Buyer plus every credited seller, ascending and deduplicated. Row
    /// locks are taken in exactly this order.
    pub lock_order: Vec<UserId>,
}

/// Result of a committed checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub order_id: OrderId,
    pub order_date: DateTime<Utc>,
    /// The buyer's balance as the committed transaction left it.
    pub new_balance: Decimal,
}

/// Validate the request shape: non-empty cart, all shipping fields present,
/// quantities at least 1. Checked in this order; the first failure wins.
fn validate(request: &CheckoutRequest) -> Result<(), CheckoutError> {
    if request.items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let shipping = &request.shipping;
    let fields: [(&'static str, &str); 6] = [
        ("firstName", &shipping.first_name),
        ("lastName", &shipping.last_name),
        ("address", &shipping.address),
        ("city", &shipping.city),
        ("postal", &shipping.postal),
        ("phone", &shipping.phone),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(CheckoutError::MissingShippingField(name));
        }
    }

    for item in &request.items {
        if item.quantity < 1 {
            return Err(CheckoutError::InvalidQuantity(item.product_id));
        }
    }

    Ok(())
}

/// Build a [`CheckoutPlan`] from a request and a catalog snapshot.
///
/// Pure: validation, price resolution, and settlement arithmetic only. The
/// lines come out ascending by (product, size), the seller credits ascending
/// by id, and the lock order covers buyer and sellers ascending, so
/// execution is deterministic.
///
/// # Errors
///
/// Returns the first validation failure, or `UnknownProduct` for the first
/// line whose product id is not in the snapshot.
pub fn build_plan(
    buyer_id: UserId,
    request: &CheckoutRequest,
    catalog: &HashMap<ProductId, ProductSnapshot>,
) -> Result<CheckoutPlan, CheckoutError> {
    validate(request)?;

    let mut lines = Vec::with_capacity(request.items.len());
    let mut total = Decimal::ZERO;
    let mut credits: BTreeMap<UserId, Decimal> = BTreeMap::new();

    for item in &request.items {
        let snapshot = catalog
            .get(&item.product_id)
            .ok_or(CheckoutError::UnknownProduct(item.product_id))?;

        let line_total = snapshot.price * Decimal::from(item.quantity);
        total += line_total;
        *credits.entry(snapshot.seller_id).or_insert(Decimal::ZERO) += line_total;

        lines.push(PlannedLine {
            product_id: item.product_id,
            name: snapshot.name.clone(),
            size: item.size.clone().unwrap_or_default(),
            quantity: item.quantity,
            unit_price: snapshot.price,
            line_total,
        });
    }

    // Execution decrements stock in line order; a fixed ascending order
    // keeps two overlapping carts from taking product row locks in
    // opposite directions.
    lines.sort_by(|a, b| (a.product_id, a.size.as_str()).cmp(&(b.product_id, b.size.as_str())));

    let lock_order: Vec<UserId> = credits
        .keys()
        .copied()
        .chain(std::iter::once(buyer_id))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    Ok(CheckoutPlan {
        buyer_id,
        lines,
        total,
        seller_credits: credits.into_iter().collect(),
        lock_order,
    })
}

/// Drives a full checkout against the database.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
    base_url: &'a str,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service. `base_url` feeds the
    /// continue-shopping link in the confirmation email.
    #[must_use]
    pub const fn new(pool: &'a PgPool, base_url: &'a str) -> Self {
        Self { pool, base_url }
    }

    /// Run a checkout for `buyer_id` end to end.
    ///
    /// Validation and planning happen before any transaction; the atomic
    /// phase opens one transaction and either commits every effect or none.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError`; every variant except `Repository` maps to a
    /// client error. Nothing has committed when this returns `Err`.
    pub async fn checkout(
        &self,
        buyer_id: UserId,
        request: &CheckoutRequest,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        validate(request)?;

        let ids: Vec<ProductId> = request.items.iter().map(|i| i.product_id).collect();
        let catalog = CatalogRepository::new(self.pool).snapshot(&ids).await?;
        let plan = build_plan(buyer_id, request, &catalog)?;

        // The confirmation email is best-effort: a failed contact lookup
        // downgrades to a skipped email, never a failed checkout.
        let contact = match UserRepository::new(self.pool).contact_email(buyer_id).await {
            Ok(contact) => contact,
            Err(e) => {
                tracing::warn!(
                    user_id = %buyer_id,
                    error = %e,
                    "contact lookup failed, confirmation email will be skipped"
                );
                None
            }
        };

        self.execute(&plan, &request.shipping, contact.as_ref())
            .await
    }

    /// Run the atomic phase of a checkout from a finished plan.
    ///
    /// # Errors
    ///
    /// Any error from the steps inside rolls the transaction back before it
    /// is returned; a rollback failure is logged without masking the
    /// original error.
    pub async fn execute(
        &self,
        plan: &CheckoutPlan,
        shipping: &ShippingAddress,
        contact: Option<&Email>,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::Database)?;

        match self.apply(&mut tx, plan, shipping, contact).await {
            Ok(receipt) => {
                tx.commit().await.map_err(RepositoryError::Database)?;
                tracing::info!(
                    order_id = %receipt.order_id,
                    buyer_id = %plan.buyer_id,
                    total = %plan.total,
                    "order placed"
                );
                Ok(receipt)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(
                        buyer_id = %plan.buyer_id,
                        error = %rollback_err,
                        "checkout rollback failed"
                    );
                }
                Err(e)
            }
        }
    }

    async fn apply(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        plan: &CheckoutPlan,
        shipping: &ShippingAddress,
        contact: Option<&Email>,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        // Lock every principal ascending; capture the buyer's balance from
        // its locked read, never from an earlier snapshot.
        let mut buyer_balance = None;
        for &principal in &plan.lock_order {
            match LedgerRepository::locked_read(tx, principal).await? {
                Some(balance) => {
                    if principal == plan.buyer_id {
                        buyer_balance = Some(balance);
                    }
                }
                None if principal == plan.buyer_id => {
                    // A buyer without a balance row cannot cover anything.
                    return Err(CheckoutError::InsufficientFunds);
                }
                None => {
                    return Err(RepositoryError::DataCorruption(format!(
                        "seller {principal} has no balance row"
                    ))
                    .into());
                }
            }
        }
        let Some(buyer_balance) = buyer_balance else {
            return Err(CheckoutError::InsufficientFunds);
        };

        // No writes have happened yet; an insufficient buyer aborts clean.
        if buyer_balance < plan.total {
            return Err(CheckoutError::InsufficientFunds);
        }

        let mut new_balance = LedgerRepository::adjust(tx, plan.buyer_id, -plan.total).await?;
        for &(seller_id, amount) in &plan.seller_credits {
            let balance = LedgerRepository::adjust(tx, seller_id, amount).await?;
            // A buyer purchasing their own product credits themselves back;
            // the receipt must reflect the final row value.
            if seller_id == plan.buyer_id {
                new_balance = balance;
            }
        }

        let shipping_text = format!(
            "{}, {} {}",
            shipping.address, shipping.city, shipping.postal
        );
        let placed =
            OrderRepository::create_order(tx, plan.buyer_id, plan.total, &shipping_text).await?;

        for line in &plan.lines {
            OrderRepository::add_order_item(
                tx,
                placed.order_id,
                line.product_id,
                line.quantity,
                line.unit_price,
            )
            .await?;

            let decremented =
                InventoryRepository::decrement(tx, line.product_id, &line.size, line.quantity)
                    .await?;
            if !decremented {
                return Err(CheckoutError::OutOfStock {
                    product_id: line.product_id,
                    size: line.size.clone(),
                });
            }
        }

        CartRepository::clear(tx, plan.buyer_id).await?;

        self.enqueue_confirmation(tx, plan, shipping, contact, new_balance)
            .await?;

        Ok(CheckoutReceipt {
            order_id: placed.order_id,
            order_date: placed.order_date,
            new_balance,
        })
    }

    /// Render the confirmation email and enqueue it in the checkout
    /// transaction. A missing contact or a render failure logs a warning
    /// and skips the email; only the outbox insert itself can abort.
    async fn enqueue_confirmation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        plan: &CheckoutPlan,
        shipping: &ShippingAddress,
        contact: Option<&Email>,
        new_balance: Decimal,
    ) -> Result<(), CheckoutError> {
        let Some(contact) = contact else {
            tracing::warn!(
                buyer_id = %plan.buyer_id,
                "buyer has no contact row, skipping confirmation email"
            );
            return Ok(());
        };

        let buyer_name = format!("{} {}", shipping.first_name, shipping.last_name);
        let items: Vec<ConfirmationLine> = plan
            .lines
            .iter()
            .map(|line| ConfirmationLine {
                name: line.name.clone(),
                size: line.size.clone(),
                quantity: line.quantity,
                line_total: line.line_total,
            })
            .collect();

        match confirmation::render(&buyer_name, shipping, &items, new_balance, self.base_url) {
            Ok(email) => {
                OutboxRepository::enqueue(
                    tx,
                    NewOutboxEmail {
                        recipient: contact.as_str().to_owned(),
                        subject: email.subject,
                        text_body: email.text_body,
                        html_body: email.html_body,
                    },
                )
                .await?;
            }
            Err(e) => {
                tracing::warn!(
                    buyer_id = %plan.buyer_id,
                    error = %e,
                    "confirmation render failed, skipping email"
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shipping() -> ShippingAddress {
        ShippingAddress {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "1 Analytical Way".to_string(),
            city: "London".to_string(),
            postal: "NW1 4RY".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn item(product_id: i32, quantity: i32, size: Option<&str>) -> CheckoutItem {
        CheckoutItem {
            product_id: ProductId::new(product_id),
            quantity,
            size: size.map(str::to_string),
        }
    }

    fn request(items: Vec<CheckoutItem>) -> CheckoutRequest {
        CheckoutRequest {
            shipping: shipping(),
            items,
        }
    }

    fn catalog(entries: &[(i32, &str, &str, i32)]) -> HashMap<ProductId, ProductSnapshot> {
        entries
            .iter()
            .map(|&(id, name, price, seller)| {
                (
                    ProductId::new(id),
                    ProductSnapshot {
                        id: ProductId::new(id),
                        name: name.to_string(),
                        price: price.parse().unwrap(),
                        seller_id: UserId::new(seller),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_cart_rejected() {
        let err = build_plan(UserId::new(1), &request(vec![]), &HashMap::new()).unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
        assert_eq!(err.to_string(), "Cart is empty");
    }

    #[test]
    fn test_empty_cart_checked_before_shipping() {
        let req = CheckoutRequest {
            shipping: ShippingAddress::default(),
            items: vec![],
        };
        let err = build_plan(UserId::new(1), &req, &HashMap::new()).unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[test]
    fn test_missing_shipping_field_is_named() {
        let blank = |field: &str| {
            let mut s = shipping();
            match field {
                "firstName" => s.first_name = String::new(),
                "lastName" => s.last_name = String::new(),
                "address" => s.address = String::new(),
                "city" => s.city = String::new(),
                "postal" => s.postal = String::new(),
                "phone" => s.phone = String::new(),
                other => panic!("unknown field {other}"),
            }
            s
        };

        for field in ["firstName", "lastName", "address", "city", "postal", "phone"] {
            let req = CheckoutRequest {
                shipping: blank(field),
                items: vec![item(10, 1, None)],
            };
            let err = build_plan(UserId::new(1), &req, &HashMap::new()).unwrap_err();
            assert_eq!(err.to_string(), format!("Missing shipping.{field}"));
        }
    }

    #[test]
    fn test_whitespace_shipping_field_counts_as_missing() {
        let mut s = shipping();
        s.city = "   ".to_string();
        let req = CheckoutRequest {
            shipping: s,
            items: vec![item(10, 1, None)],
        };
        let err = build_plan(UserId::new(1), &req, &HashMap::new()).unwrap_err();
        assert_eq!(err.to_string(), "Missing shipping.city");
    }

    #[test]
    fn test_first_missing_field_wins() {
        // firstName is checked before phone.
        let mut s = shipping();
        s.first_name = String::new();
        s.phone = String::new();
        let req = CheckoutRequest {
            shipping: s,
            items: vec![item(10, 1, None)],
        };
        let err = build_plan(UserId::new(1), &req, &HashMap::new()).unwrap_err();
        assert_eq!(err.to_string(), "Missing shipping.firstName");
    }

    #[test]
    fn test_quantity_floor() {
        let cat = catalog(&[(10, "Tee", "30", 2)]);
        for bad in [0, -3] {
            let err = build_plan(UserId::new(1), &request(vec![item(10, bad, None)]), &cat)
                .unwrap_err();
            assert!(matches!(
                err,
                CheckoutError::InvalidQuantity(id) if id == ProductId::new(10)
            ));
        }
    }

    #[test]
    fn test_unknown_product_is_identified() {
        let cat = catalog(&[(10, "Tee", "30", 2)]);
        let err = build_plan(
            UserId::new(1),
            &request(vec![item(10, 1, None), item(99, 1, None)]),
            &cat,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::UnknownProduct(id) if id == ProductId::new(99)
        ));
        assert_eq!(err.to_string(), "Invalid product 99");
    }

    #[test]
    fn test_plan_settlement_two_sellers() {
        // price 30 x2 from seller 2, price 10 x1 from seller 3, buyer 1.
        let cat = catalog(&[(10, "Tee", "30", 2), (11, "Mug", "10", 3)]);
        let plan = build_plan(
            UserId::new(1),
            &request(vec![item(10, 2, None), item(11, 1, None)]),
            &cat,
        )
        .unwrap();

        assert_eq!(plan.total, Decimal::from(70));
        assert_eq!(
            plan.seller_credits,
            vec![
                (UserId::new(2), Decimal::from(60)),
                (UserId::new(3), Decimal::from(10)),
            ]
        );
        assert_eq!(
            plan.lock_order,
            vec![UserId::new(1), UserId::new(2), UserId::new(3)]
        );
        assert_eq!(plan.lines.len(), 2);
        assert_eq!(plan.lines[0].unit_price, Decimal::from(30));
        assert_eq!(plan.lines[0].line_total, Decimal::from(60));
        assert_eq!(plan.lines[1].line_total, Decimal::from(10));
    }

    #[test]
    fn test_same_seller_credits_merge() {
        let cat = catalog(&[(10, "Tee", "30", 7), (11, "Cap", "5", 7)]);
        let plan = build_plan(
            UserId::new(1),
            &request(vec![item(10, 1, None), item(11, 2, None)]),
            &cat,
        )
        .unwrap();

        assert_eq!(plan.seller_credits, vec![(UserId::new(7), Decimal::from(40))]);
        assert_eq!(plan.lock_order, vec![UserId::new(1), UserId::new(7)]);
    }

    #[test]
    fn test_lock_order_sorted_with_high_buyer_id() {
        // Buyer id above all sellers still sorts into place.
        let cat = catalog(&[(10, "Tee", "30", 4), (11, "Mug", "10", 2)]);
        let plan = build_plan(
            UserId::new(9),
            &request(vec![item(10, 1, None), item(11, 1, None)]),
            &cat,
        )
        .unwrap();

        assert_eq!(
            plan.lock_order,
            vec![UserId::new(2), UserId::new(4), UserId::new(9)]
        );
    }

    #[test]
    fn test_buyer_selling_to_self_is_deduplicated() {
        let cat = catalog(&[(10, "Tee", "30", 5)]);
        let plan = build_plan(UserId::new(5), &request(vec![item(10, 1, None)]), &cat).unwrap();

        assert_eq!(plan.lock_order, vec![UserId::new(5)]);
        assert_eq!(plan.seller_credits, vec![(UserId::new(5), Decimal::from(30))]);
    }

    #[test]
    fn test_size_normalizes_to_empty_string() {
        let cat = catalog(&[(10, "Tee", "30", 2)]);
        let plan = build_plan(
            UserId::new(1),
            &request(vec![item(10, 1, None), item(10, 1, Some("M"))]),
            &cat,
        )
        .unwrap();

        assert_eq!(plan.lines[0].size, "");
        assert_eq!(plan.lines[1].size, "M");
    }

    #[test]
    fn test_lines_come_out_ascending_by_product_and_size() {
        let cat = catalog(&[(10, "Tee", "30", 2), (11, "Mug", "10", 3)]);
        let plan = build_plan(
            UserId::new(1),
            &request(vec![
                item(11, 1, None),
                item(10, 1, Some("M")),
                item(10, 2, Some("L")),
            ]),
            &cat,
        )
        .unwrap();

        let order: Vec<(ProductId, &str)> = plan
            .lines
            .iter()
            .map(|line| (line.product_id, line.size.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (ProductId::new(10), "L"),
                (ProductId::new(10), "M"),
                (ProductId::new(11), ""),
            ]
        );
    }

    #[test]
    fn test_fractional_prices_settle_exactly() {
        let cat = catalog(&[(10, "Tee", "19.99", 2)]);
        let plan = build_plan(UserId::new(1), &request(vec![item(10, 3, None)]), &cat).unwrap();

        assert_eq!(plan.total, "59.97".parse().unwrap());
    }

    #[test]
    fn test_request_deserializes_from_api_shape() {
        let json = serde_json::json!({
            "shipping": {
                "firstName": "Ada",
                "lastName": "Lovelace",
                "address": "1 Analytical Way",
                "city": "London",
                "postal": "NW1 4RY",
                "phone": "555-0100"
            },
            "items": [
                { "productId": 10, "quantity": 2 },
                { "productId": 11, "quantity": 1, "size": "M" }
            ]
        });

        let req: CheckoutRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.items[0].product_id, ProductId::new(10));
        assert_eq!(req.items[0].size, None);
        assert_eq!(req.items[1].size.as_deref(), Some("M"));
        assert_eq!(req.shipping.first_name, "Ada");
    }

    #[test]
    fn test_request_with_missing_sections_fails_validation_not_serde() {
        let req: CheckoutRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        let err = build_plan(UserId::new(1), &req, &HashMap::new()).unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[test]
    fn test_receipt_serializes_with_api_keys() {
        let receipt = CheckoutReceipt {
            order_id: OrderId::new(42),
            order_date: "2026-02-01T10:00:00Z".parse().unwrap(),
            new_balance: Decimal::from(30),
        };

        let value = serde_json::to_value(&receipt).unwrap();
        assert!(value.get("orderId").is_some());
        assert!(value.get("orderDate").is_some());
        assert_eq!(value["newBalance"], serde_json::json!("30"));
    }
}
