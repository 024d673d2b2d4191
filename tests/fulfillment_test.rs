mod common;

use common::*;
use order_recon::domain::error::ReconError;
use order_recon::domain::order::OrderStatus;
use order_recon::services::fulfillment::set_order_status;
use uuid::Uuid;

// ── full_lifecycle_stamps_delivered_at ─────────────────────────────────────

#[tokio::test]
#[ignore = "requires Postgres integration environment"]
async fn full_lifecycle_stamps_delivered_at() {
    let pool = setup_pool("order_recon_test_fulfillment").await;
    let order_id = make_paid_order(&pool, "order_ff_life", "pay_ff_life").await;

    let shipped = set_order_status(&pool, order_id, OrderStatus::Shipped)
        .await
        .unwrap();
    assert_eq!(shipped.order_status, OrderStatus::Shipped);
    assert!(shipped.delivered_at.is_none());

    let delivered = set_order_status(&pool, order_id, OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(delivered.order_status, OrderStatus::Delivered);
    assert!(delivered.delivered_at.is_some());
}

// ── terminal_states_reject_transitions ─────────────────────────────────────

#[tokio::test]
#[ignore = "requires Postgres integration environment"]
async fn terminal_states_reject_transitions() {
    let pool = setup_pool("order_recon_test_fulfillment").await;
    let order_id = make_paid_order(&pool, "order_ff_term", "pay_ff_term").await;

    set_order_status(&pool, order_id, OrderStatus::Shipped)
        .await
        .unwrap();
    let delivered = set_order_status(&pool, order_id, OrderStatus::Delivered)
        .await
        .unwrap();
    let stamped = delivered.delivered_at.unwrap();

    for target in [
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Cancelled,
    ] {
        let err = set_order_status(&pool, order_id, target).await.unwrap_err();
        assert!(matches!(err, ReconError::InvalidStatusTransition(_)));
    }

    // delivered_at untouched by the rejected attempts.
    let row = get_order_state(&pool, order_id).await.unwrap();
    assert_eq!(row.order_status, "Delivered");
    assert_eq!(row.delivered_at.unwrap(), stamped);
}

// ── skipping_shipped_is_rejected ───────────────────────────────────────────

#[tokio::test]
#[ignore = "requires Postgres integration environment"]
async fn skipping_shipped_is_rejected() {
    let pool = setup_pool("order_recon_test_fulfillment").await;
    let order_id = make_paid_order(&pool, "order_ff_skip", "pay_ff_skip").await;

    let err = set_order_status(&pool, order_id, OrderStatus::Delivered)
        .await
        .unwrap_err();
    assert!(matches!(err, ReconError::InvalidStatusTransition(_)));

    let row = get_order_state(&pool, order_id).await.unwrap();
    assert_eq!(row.order_status, "Processing");
}

// ── cancelled_orders_are_frozen ────────────────────────────────────────────

#[tokio::test]
#[ignore = "requires Postgres integration environment"]
async fn cancelled_orders_are_frozen() {
    let pool = setup_pool("order_recon_test_fulfillment").await;
    let order_id = make_paid_order(&pool, "order_ff_cxl", "pay_ff_cxl").await;

    set_order_status(&pool, order_id, OrderStatus::Shipped)
        .await
        .unwrap();
    set_order_status(&pool, order_id, OrderStatus::Cancelled)
        .await
        .unwrap();

    let err = set_order_status(&pool, order_id, OrderStatus::Delivered)
        .await
        .unwrap_err();
    assert!(matches!(err, ReconError::InvalidStatusTransition(_)));
}

// ── unknown_order_is_not_found ─────────────────────────────────────────────

#[tokio::test]
#[ignore = "requires Postgres integration environment"]
async fn unknown_order_is_not_found() {
    let pool = setup_pool("order_recon_test_fulfillment").await;
    let err = set_order_status(&pool, Uuid::now_v7(), OrderStatus::Shipped)
        .await
        .unwrap_err();
    assert!(matches!(err, ReconError::NotFound(_)));
}
