use order_recon::domain::exchange::ExchangeStatus;
use order_recon::domain::money::MoneyAmount;
use order_recon::domain::order::{OrderStatus, PaymentState};
use proptest::prelude::*;

fn arb_payment_state() -> impl Strategy<Value = PaymentState> {
    prop_oneof![
        Just(PaymentState::Processing),
        Just(PaymentState::Paid),
        Just(PaymentState::Failed),
    ]
}

fn arb_order_status() -> impl Strategy<Value = OrderStatus> {
    prop_oneof![
        Just(OrderStatus::Processing),
        Just(OrderStatus::Shipped),
        Just(OrderStatus::Delivered),
        Just(OrderStatus::Cancelled),
    ]
}

proptest! {
    /// Terminal payment states (paid, failed) can never transition to anything.
    #[test]
    fn terminal_payment_states_reject_all_transitions(target in arb_payment_state()) {
        use PaymentState::*;
        for terminal in [Paid, Failed] {
            prop_assert!(!terminal.can_transition_to(&target));
        }
    }

    /// Any random sequence of payment transitions starting from Processing
    /// has at most 1 valid step — every reachable state is terminal.
    #[test]
    fn payment_walk_has_at_most_one_transition(
        steps in prop::collection::vec(arb_payment_state(), 1..20)
    ) {
        let mut current = PaymentState::Processing;
        let mut transitions = 0u32;
        for next in &steps {
            if current.can_transition_to(next) {
                current = *next;
                transitions += 1;
            }
        }
        prop_assert!(transitions <= 1, "got {transitions} transitions in walk: {steps:?}");
    }

    /// Delivered and Cancelled orders accept no further transitions.
    #[test]
    fn terminal_order_statuses_reject_all_transitions(target in arb_order_status()) {
        use OrderStatus::*;
        for terminal in [Delivered, Cancelled] {
            prop_assert!(!terminal.can_transition_to(&target));
        }
    }

    /// The fulfillment machine is forward-only: no walk from Processing takes
    /// more than 2 steps (Processing → Shipped → Delivered is the longest),
    /// and no walk ever returns to Processing.
    #[test]
    fn order_walk_is_forward_only(
        steps in prop::collection::vec(arb_order_status(), 1..20)
    ) {
        let mut current = OrderStatus::Processing;
        let mut transitions = 0u32;
        for next in &steps {
            if current.can_transition_to(next) {
                prop_assert!(*next != OrderStatus::Processing);
                current = *next;
                transitions += 1;
            }
        }
        prop_assert!(transitions <= 2, "got {transitions} transitions in walk: {steps:?}");
    }

    /// as_str → try_from roundtrip is identity for every state enum.
    #[test]
    fn payment_state_roundtrip(state in arb_payment_state()) {
        prop_assert_eq!(PaymentState::try_from(state.as_str()).unwrap(), state);
    }

    #[test]
    fn order_status_roundtrip(status in arb_order_status()) {
        prop_assert_eq!(OrderStatus::try_from(status.as_str()).unwrap(), status);
    }

    #[test]
    fn exchange_status_roundtrip(
        status in prop_oneof![
            Just(ExchangeStatus::Pending),
            Just(ExchangeStatus::Accepted),
            Just(ExchangeStatus::Rejected),
        ]
    ) {
        prop_assert_eq!(ExchangeStatus::try_from(status.as_str()).unwrap(), status);
    }

    /// MoneyAmount rejects negatives and survives roundtrip through minor().
    #[test]
    fn money_amount_roundtrip(minor in 0i64..=i64::MAX) {
        let amount = MoneyAmount::new(minor).unwrap();
        prop_assert_eq!(amount.minor(), minor);
    }

    #[test]
    fn negative_money_rejected(minor in i64::MIN..0i64) {
        prop_assert!(MoneyAmount::new(minor).is_err());
    }

    /// checked_add matches i64::checked_add — never silently overflows.
    #[test]
    fn money_add_never_silently_overflows(a in 0i64..=i64::MAX, b in 0i64..=i64::MAX) {
        let result = MoneyAmount::new(a).unwrap().checked_add(MoneyAmount::new(b).unwrap());
        match a.checked_add(b) {
            Some(expected) => prop_assert_eq!(result.unwrap().minor(), expected),
            None => prop_assert!(result.is_none()),
        }
    }

    /// checked_mul matches i64::checked_mul for any quantity.
    #[test]
    fn money_mul_never_silently_overflows(price in 0i64..=i64::MAX, qty in 0u32..=u32::MAX) {
        let result = MoneyAmount::new(price).unwrap().checked_mul(qty);
        match price.checked_mul(i64::from(qty)) {
            Some(expected) => prop_assert_eq!(result.unwrap().minor(), expected),
            None => prop_assert!(result.is_none()),
        }
    }
}
