mod common;

use common::*;
use order_recon::domain::error::ReconError;
use order_recon::infra::postgres::catalog_repo::PgCatalog;
use order_recon::services::checkout::{CheckoutPayload, verify_and_record};
use order_recon::services::pricing::PricingPolicy;
use uuid::Uuid;

fn payload(product: Uuid, quantity: u32) -> CheckoutPayload {
    CheckoutPayload {
        user_id: Uuid::now_v7(),
        lines: vec![line(product, quantity)],
        shipping_info: address(),
        billing_info: None,
    }
}

// ── verified_checkout_records_paid_order ───────────────────────────────────

#[tokio::test]
#[ignore = "requires Postgres integration environment"]
async fn verified_checkout_records_paid_order() {
    let pool = setup_pool("order_recon_test_checkout").await;
    let shirt = Uuid::now_v7();
    seed_product(&pool, &item(shirt, "oxford shirt", 159_900, 10)).await;
    let catalog = PgCatalog::new(pool.clone());

    let order = verify_and_record(
        &pool,
        &catalog,
        &PricingPolicy::default(),
        CHECKOUT_SECRET,
        &signed_claim("order_co_1", "pay_co_1"),
        payload(shirt, 2),
    )
    .await
    .unwrap();

    let row = get_order_state(&pool, order.id).await.unwrap();
    assert_eq!(row.payment_status, "paid");
    assert_eq!(row.order_status, "Processing");
    assert_eq!(row.payment_id.as_deref(), Some("pay_co_1"));
    // 2 × 159_900 clears the free-shipping threshold.
    assert_eq!(row.total_price, 2 * 159_900);
    assert_eq!(
        order.total_price.minor(),
        order.items_price.minor()
            + order.shipping_price.minor()
            + order.gift_wrap_price.minor()
    );
}

// ── tampered_signature_creates_nothing ─────────────────────────────────────

#[tokio::test]
#[ignore = "requires Postgres integration environment"]
async fn tampered_signature_creates_nothing() {
    let pool = setup_pool("order_recon_test_checkout").await;
    let shirt = Uuid::now_v7();
    seed_product(&pool, &item(shirt, "denim jacket", 299_900, 10)).await;
    let catalog = PgCatalog::new(pool.clone());

    // Genuine ids, wrong signature.
    let mut claim = signed_claim("order_co_tamper", "pay_co_tamper");
    claim.signature = signed_claim("order_co_tamper", "pay_co_other").signature;

    let err = verify_and_record(
        &pool,
        &catalog,
        &PricingPolicy::default(),
        CHECKOUT_SECRET,
        &claim,
        payload(shirt, 1),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ReconError::PaymentVerification(_)));
    assert_eq!(count_orders_for_intent(&pool, "order_co_tamper").await, 0);
}

// ── double_submit_returns_existing_order ───────────────────────────────────

#[tokio::test]
#[ignore = "requires Postgres integration environment"]
async fn double_submit_returns_existing_order() {
    let pool = setup_pool("order_recon_test_checkout").await;
    let shirt = Uuid::now_v7();
    seed_product(&pool, &item(shirt, "chore coat", 219_900, 10)).await;
    let catalog = PgCatalog::new(pool.clone());
    let policy = PricingPolicy::default();
    let claim = signed_claim("order_co_dup", "pay_co_dup");

    let first = verify_and_record(
        &pool,
        &catalog,
        &policy,
        CHECKOUT_SECRET,
        &claim,
        payload(shirt, 1),
    )
    .await
    .unwrap();
    let second = verify_and_record(
        &pool,
        &catalog,
        &policy,
        CHECKOUT_SECRET,
        &claim,
        payload(shirt, 1),
    )
    .await
    .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(count_orders_for_intent(&pool, "order_co_dup").await, 1);
}

// ── stock_rechecked_at_verification_time ───────────────────────────────────

#[tokio::test]
#[ignore = "requires Postgres integration environment"]
async fn stock_rechecked_at_verification_time() {
    let pool = setup_pool("order_recon_test_checkout").await;
    let scarf = Uuid::now_v7();
    seed_product(&pool, &item(scarf, "last scarf", 59_900, 1)).await;
    let catalog = PgCatalog::new(pool.clone());

    let err = verify_and_record(
        &pool,
        &catalog,
        &PricingPolicy::default(),
        CHECKOUT_SECRET,
        &signed_claim("order_co_stock", "pay_co_stock"),
        payload(scarf, 2),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ReconError::InvalidOrder(_)));
    assert_eq!(count_orders_for_intent(&pool, "order_co_stock").await, 0);
}
