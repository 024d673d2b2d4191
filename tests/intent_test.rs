mod common;

use common::*;
use order_recon::domain::error::ReconError;
use order_recon::domain::gateway::{CreatedIntent, PaymentGateway};
use order_recon::domain::money::Money;
use order_recon::services::checkout::issue_intent;
use order_recon::services::pricing::PricingPolicy;
use uuid::Uuid;

/// Gateway that is down: every call fails the way a timeout does.
struct DownGateway;

impl PaymentGateway for DownGateway {
    fn create_intent(
        &self,
        _money: Money,
        _receipt: &str,
    ) -> std::pin::Pin<
        Box<dyn Future<Output = Result<CreatedIntent, ReconError>> + Send + '_>,
    > {
        Box::pin(async {
            Err(ReconError::GatewayUnavailable(
                "create intent: operation timed out".into(),
            ))
        })
    }
}

// ── intent_carries_repriced_total ──────────────────────────────────────────

#[tokio::test]
async fn intent_carries_repriced_total() {
    let shirt = Uuid::now_v7();
    let catalog = MemCatalog::new(vec![item(shirt, "flannel shirt", 89_900, 10)]);
    let gateway = MemGateway::new();

    let issued = issue_intent(
        &gateway,
        &catalog,
        &PricingPolicy::default(),
        &[line(shirt, 1)],
        "key_test_1",
    )
    .await
    .unwrap();

    assert!(issued.intent_id.as_str().starts_with("order_"));
    // 89_900 items + 4_900 shipping, below the free-shipping threshold.
    assert_eq!(issued.amount.minor(), 89_900 + 4_900);
    assert_eq!(issued.key_id, "key_test_1");
}

// ── reissuing_creates_distinct_intents ─────────────────────────────────────
// Issuance writes nothing on our side, so retrying after an abandoned
// checkout simply mints another intent.

#[tokio::test]
async fn reissuing_creates_distinct_intents() {
    let shirt = Uuid::now_v7();
    let catalog = MemCatalog::new(vec![item(shirt, "flannel shirt", 89_900, 10)]);
    let gateway = MemGateway::new();
    let policy = PricingPolicy::default();

    let first = issue_intent(&gateway, &catalog, &policy, &[line(shirt, 1)], "key")
        .await
        .unwrap();
    let second = issue_intent(&gateway, &catalog, &policy, &[line(shirt, 1)], "key")
        .await
        .unwrap();

    assert_ne!(first.intent_id, second.intent_id);
    assert_eq!(first.amount, second.amount);
}

// ── gateway_outage_surfaces_unavailable ────────────────────────────────────

#[tokio::test]
async fn gateway_outage_surfaces_unavailable() {
    let shirt = Uuid::now_v7();
    let catalog = MemCatalog::new(vec![item(shirt, "flannel shirt", 89_900, 10)]);

    let err = issue_intent(
        &DownGateway,
        &catalog,
        &PricingPolicy::default(),
        &[line(shirt, 1)],
        "key",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ReconError::GatewayUnavailable(_)));
}

// ── invalid_cart_never_reaches_the_gateway ─────────────────────────────────

#[tokio::test]
async fn invalid_cart_never_reaches_the_gateway() {
    let catalog = MemCatalog::new(vec![]);

    // A gateway that panics if called would fail the test; DownGateway's
    // error would too, differently. Pricing rejects first.
    let err = issue_intent(
        &DownGateway,
        &catalog,
        &PricingPolicy::default(),
        &[line(Uuid::now_v7(), 1)],
        "key",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ReconError::InvalidOrder(_)));
}
