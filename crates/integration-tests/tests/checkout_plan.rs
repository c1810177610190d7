//! Integration tests for the checkout planning phase.
//!
//! These tests verify settlement arithmetic, principal lock ordering, and
//! request validation without requiring a database. The transactional phase
//! replays a plan verbatim, so the properties checked here are the ones
//! that keep concurrent checkouts deterministic.

use std::collections::HashMap;

use rust_decimal::Decimal;

use smartcart_core::{ProductId, UserId};
use smartcart_server::models::ProductSnapshot;
use smartcart_server::services::checkout::{
    CheckoutError, CheckoutItem, CheckoutRequest, ShippingAddress, build_plan,
};

fn dec(s: &str) -> Decimal {
    s.parse().expect("valid decimal literal")
}

fn shipping() -> ShippingAddress {
    ShippingAddress {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        address: "12 Analytical Way".to_string(),
        city: "London".to_string(),
        postal: "N1 9GU".to_string(),
        phone: "+44 20 7946 0000".to_string(),
    }
}

fn item(product_id: i32, quantity: i32, size: Option<&str>) -> CheckoutItem {
    CheckoutItem {
        product_id: ProductId::new(product_id),
        quantity,
        size: size.map(str::to_string),
    }
}

/// Build a catalog snapshot from `(id, name, price, seller_id)` rows.
fn catalog(rows: &[(i32, &str, &str, i32)]) -> HashMap<ProductId, ProductSnapshot> {
    rows.iter()
        .map(|&(id, name, price, seller_id)| {
            (
                ProductId::new(id),
                ProductSnapshot {
                    id: ProductId::new(id),
                    name: name.to_string(),
                    price: dec(price),
                    seller_id: UserId::new(seller_id),
                },
            )
        })
        .collect()
}

fn request(items: Vec<CheckoutItem>) -> CheckoutRequest {
    CheckoutRequest {
        shipping: shipping(),
        items,
    }
}

// =============================================================================
// Settlement Tests
// =============================================================================

#[test]
fn test_two_seller_settlement() {
    let catalog = catalog(&[
        (1, "Classic Logo Tee", "30.00", 2),
        (2, "Enamel Camp Mug", "10.00", 3),
    ]);
    let request = request(vec![item(1, 2, Some("M")), item(2, 1, None)]);

    let plan = build_plan(UserId::new(1), &request, &catalog).expect("plan should build");

    assert_eq!(plan.total, dec("70.00"));
    assert_eq!(
        plan.seller_credits,
        vec![
            (UserId::new(2), dec("60.00")),
            (UserId::new(3), dec("10.00")),
        ]
    );
    assert_eq!(
        plan.lock_order,
        vec![UserId::new(1), UserId::new(2), UserId::new(3)]
    );
}

#[test]
fn test_credits_conserve_total() {
    let catalog = catalog(&[
        (1, "Tee", "30.00", 2),
        (2, "Mug", "10.00", 3),
        (3, "Tote", "19.99", 2),
        (4, "Sticker", "0.10", 5),
    ]);
    let request = request(vec![
        item(3, 1, None),
        item(1, 3, Some("S")),
        item(4, 7, None),
        item(2, 2, None),
    ]);

    let plan = build_plan(UserId::new(9), &request, &catalog).expect("plan should build");

    let credited: Decimal = plan.seller_credits.iter().map(|(_, amount)| amount).sum();
    assert_eq!(credited, plan.total);

    let line_sum: Decimal = plan.lines.iter().map(|line| line.line_total).sum();
    assert_eq!(line_sum, plan.total);
}

#[test]
fn test_decimal_prices_settle_exactly() {
    // 3 x 0.10 must come out as exactly 0.30, not a float approximation.
    let catalog = catalog(&[(4, "Sticker", "0.10", 5)]);
    let request = request(vec![item(4, 3, None)]);

    let plan = build_plan(UserId::new(1), &request, &catalog).expect("plan should build");

    assert_eq!(plan.total, dec("0.30"));
    assert_eq!(plan.seller_credits, vec![(UserId::new(5), dec("0.30"))]);
}

#[test]
fn test_repeat_lines_accumulate_per_seller() {
    let catalog = catalog(&[(1, "Classic Logo Tee", "30.00", 2)]);
    let request = request(vec![item(1, 1, Some("S")), item(1, 2, Some("L"))]);

    let plan = build_plan(UserId::new(1), &request, &catalog).expect("plan should build");

    // Lines stay separate per size, the seller credit does not.
    assert_eq!(plan.lines.len(), 2);
    assert_eq!(plan.seller_credits, vec![(UserId::new(2), dec("90.00"))]);
}

#[test]
fn test_unsized_line_normalizes_to_empty_string() {
    let catalog = catalog(&[(2, "Enamel Camp Mug", "10.00", 3)]);
    let request = request(vec![item(2, 1, None)]);

    let plan = build_plan(UserId::new(1), &request, &catalog).expect("plan should build");

    let line = plan.lines.first().expect("one line");
    assert_eq!(line.size, "");
    assert_eq!(line.unit_price, dec("10.00"));
    assert_eq!(line.line_total, dec("10.00"));
}

// =============================================================================
// Lock Order Tests
// =============================================================================

#[test]
fn test_plan_is_item_order_insensitive() {
    let catalog = catalog(&[
        (1, "Tee", "30.00", 7),
        (2, "Mug", "10.00", 3),
        (3, "Tote", "19.99", 9),
    ]);
    let forward = request(vec![item(1, 1, Some("M")), item(2, 2, None), item(3, 1, None)]);
    let reverse = request(vec![item(3, 1, None), item(2, 2, None), item(1, 1, Some("M"))]);

    let plan_a = build_plan(UserId::new(5), &forward, &catalog).expect("plan should build");
    let plan_b = build_plan(UserId::new(5), &reverse, &catalog).expect("plan should build");

    // Two checkouts with the same content lock the same rows in the same
    // order no matter how the cart was assembled. That covers the priced
    // lines too: stock rows are decremented in line order.
    assert_eq!(plan_a.total, plan_b.total);
    assert_eq!(plan_a.seller_credits, plan_b.seller_credits);
    assert_eq!(plan_a.lock_order, plan_b.lock_order);
    assert_eq!(plan_a.lines, plan_b.lines);
}

#[test]
fn test_lock_order_is_ascending_and_unique() {
    let catalog = catalog(&[
        (1, "A", "1.00", 9),
        (2, "B", "1.00", 3),
        (3, "C", "1.00", 7),
    ]);
    let request = request(vec![item(1, 1, None), item(2, 1, None), item(3, 1, None)]);

    let plan = build_plan(UserId::new(5), &request, &catalog).expect("plan should build");

    assert_eq!(
        plan.lock_order,
        vec![
            UserId::new(3),
            UserId::new(5),
            UserId::new(7),
            UserId::new(9),
        ]
    );
}

#[test]
fn test_buyer_appears_once_when_also_seller() {
    let catalog = catalog(&[(1, "Own Product", "5.00", 2)]);
    let request = request(vec![item(1, 1, None)]);

    let plan = build_plan(UserId::new(2), &request, &catalog).expect("plan should build");

    assert_eq!(plan.lock_order, vec![UserId::new(2)]);
    assert_eq!(plan.seller_credits, vec![(UserId::new(2), dec("5.00"))]);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_empty_cart_rejected_before_shipping() {
    let catalog = catalog(&[]);
    let request = CheckoutRequest {
        shipping: ShippingAddress::default(),
        items: vec![],
    };

    let err = build_plan(UserId::new(1), &request, &catalog).expect_err("empty cart must fail");
    assert!(matches!(err, CheckoutError::EmptyCart));
}

#[test]
fn test_missing_shipping_rejected_before_product_resolution() {
    // Product 99 does not exist, but the blank phone is reported first.
    let catalog = catalog(&[]);
    let mut shipping = shipping();
    shipping.phone = "  ".to_string();
    let request = CheckoutRequest {
        shipping,
        items: vec![item(99, 1, None)],
    };

    let err = build_plan(UserId::new(1), &request, &catalog).expect_err("blank field must fail");
    assert!(matches!(err, CheckoutError::MissingShippingField("phone")));
}

#[test]
fn test_zero_quantity_rejected() {
    let catalog = catalog(&[(1, "Tee", "30.00", 2)]);
    let request = request(vec![item(1, 0, Some("M"))]);

    let err = build_plan(UserId::new(1), &request, &catalog).expect_err("zero quantity must fail");
    match err {
        CheckoutError::InvalidQuantity(product_id) => {
            assert_eq!(product_id, ProductId::new(1));
        }
        other => panic!("expected InvalidQuantity, got {other:?}"),
    }
}

#[test]
fn test_unknown_product_rejected() {
    let catalog = catalog(&[(1, "Tee", "30.00", 2)]);
    let request = request(vec![item(1, 1, Some("M")), item(42, 1, None)]);

    let err =
        build_plan(UserId::new(1), &request, &catalog).expect_err("unknown product must fail");
    match err {
        CheckoutError::UnknownProduct(product_id) => {
            assert_eq!(product_id, ProductId::new(42));
        }
        other => panic!("expected UnknownProduct, got {other:?}"),
    }
}
