use chrono::{Duration, TimeZone, Utc};
use order_recon::domain::exchange::{EXCHANGE_WINDOW_DAYS, eligibility};
use order_recon::domain::order::OrderStatus;

fn delivered_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

// ── only_delivered_orders_are_eligible ─────────────────────────────────────

#[test]
fn only_delivered_orders_are_eligible() {
    let now = delivered_at();
    for status in [
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Cancelled,
    ] {
        let verdict = eligibility(status, None, now);
        assert!(!verdict.can_apply);
        assert!(verdict.deadline.is_none());
        assert_eq!(verdict.reason, "exchange is available only after delivery");
    }
}

// ── delivered_without_timestamp_is_unavailable ─────────────────────────────

#[test]
fn delivered_without_timestamp_is_unavailable() {
    let verdict = eligibility(OrderStatus::Delivered, None, delivered_at());
    assert!(!verdict.can_apply);
    assert_eq!(verdict.reason, "exchange is currently unavailable");
}

// ── eligible_within_window ─────────────────────────────────────────────────
// Delivered at T, checked at T + 2 days with a 3-day window.

#[test]
fn eligible_within_window() {
    let delivered = delivered_at();
    let now = delivered + Duration::days(2);

    let verdict = eligibility(OrderStatus::Delivered, Some(delivered), now);
    assert!(verdict.can_apply);
    assert_eq!(
        verdict.deadline,
        Some(delivered + Duration::days(EXCHANGE_WINDOW_DAYS))
    );
    assert!(verdict.reason.contains("exchange available until"));
}

// ── closed_after_window ────────────────────────────────────────────────────
// Same order at T + 4 days.

#[test]
fn closed_after_window() {
    let delivered = delivered_at();
    let now = delivered + Duration::days(4);

    let verdict = eligibility(OrderStatus::Delivered, Some(delivered), now);
    assert!(!verdict.can_apply);
    assert!(verdict.reason.contains("exchange window closed on"));
    assert_eq!(
        verdict.deadline,
        Some(delivered + Duration::days(EXCHANGE_WINDOW_DAYS))
    );
}

// ── deadline_instant_is_still_open ─────────────────────────────────────────
// The window closes strictly after the deadline, not at it.

#[test]
fn deadline_instant_is_still_open() {
    let delivered = delivered_at();
    let deadline = delivered + Duration::days(EXCHANGE_WINDOW_DAYS);

    assert!(eligibility(OrderStatus::Delivered, Some(delivered), deadline).can_apply);
    assert!(
        !eligibility(
            OrderStatus::Delivered,
            Some(delivered),
            deadline + Duration::seconds(1)
        )
        .can_apply
    );
}

// ── evaluation_is_deterministic ────────────────────────────────────────────

#[test]
fn evaluation_is_deterministic() {
    let delivered = delivered_at();
    let now = delivered + Duration::hours(30);

    let first = eligibility(OrderStatus::Delivered, Some(delivered), now);
    let second = eligibility(OrderStatus::Delivered, Some(delivered), now);
    assert_eq!(first, second);
}
