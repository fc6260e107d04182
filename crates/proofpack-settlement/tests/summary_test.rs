mod common;

use common::{at, event};
use proofpack_core::models::AttributionEventType::*;
use proofpack_settlement::summarize_partner;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[test]
fn splits_pending_and_settled() {
    let mut settled = event("e1", "p", Purchase, dec!(200), dec!(10), at(2, 0));
    settled.mark_settled(Uuid::new_v4()).unwrap();
    let events = vec![
        settled,
        event("e2", "p", Subscription, dec!(100), dec!(50), at(3, 0)),
        event("e3", "other", Subscription, dec!(100), dec!(50), at(3, 0)),
    ];

    let summary = summarize_partner(&events, "p", dec!(20));

    assert_eq!(summary.partner_id, "p");
    assert_eq!(summary.settled_event_count, 1);
    assert_eq!(summary.settled_gross, dec!(20));
    assert_eq!(summary.pending_event_count, 1);
    assert_eq!(summary.pending_gross, dec!(50));
    assert_eq!(summary.projected_fee, dec!(10));
    assert_eq!(summary.projected_net, dec!(40));
    assert_eq!(summary.event_type_totals.len(), 2);
}

#[test]
fn unknown_partner_is_all_zero() {
    let events = vec![event("e1", "p", Purchase, dec!(200), dec!(10), at(2, 0))];
    let summary = summarize_partner(&events, "nobody", dec!(20));

    assert_eq!(summary.pending_event_count, 0);
    assert_eq!(summary.pending_gross, Decimal::ZERO);
    assert!(summary.event_type_totals.is_empty());
}

#[test]
fn totals_past_decimal_range_do_not_panic() {
    let events: Vec<_> = (0..101)
        .map(|i| event(&format!("e{i:03}"), "p", Purchase, dec!(79000000000000000000000000000), dec!(1), at(2, 0)))
        .collect();

    let summary = summarize_partner(&events, "p", dec!(20));

    assert_eq!(summary.pending_event_count, 100);
    assert_eq!(summary.pending_gross, dec!(79000000000000000000000000000));
    assert_eq!(summary.projected_fee + summary.projected_net, summary.pending_gross);
}
