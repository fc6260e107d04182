use std::collections::HashSet;

use chrono::{Duration, TimeZone, Utc};
use proofpack_core::models::{AttributionEvent, AttributionEventType, SettlementBatch};
use proofpack_settlement::aggregate_settlements;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn arb_event_type() -> impl Strategy<Value = AttributionEventType> {
    prop_oneof![
        Just(AttributionEventType::Introduction),
        Just(AttributionEventType::Subscription),
        Just(AttributionEventType::CohortEnrollment),
        Just(AttributionEventType::Purchase),
        Just(AttributionEventType::Renewal),
        Just(AttributionEventType::Referral),
    ]
}

fn arb_event() -> impl Strategy<Value = AttributionEvent> {
    (
        0usize..5,
        arb_event_type(),
        0i64..10_000_000,
        1i64..=10_000,
        0i64..60,
    )
        .prop_map(|(partner, event_type, cents, basis_points, day)| {
            let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
            AttributionEvent::new(
                format!("partner-{partner}"),
                "sme",
                event_type,
                Decimal::new(cents, 2),
                Decimal::new(basis_points, 2),
                start + Duration::days(day),
            )
            .unwrap()
        })
}

// ── Gross conservation ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn gross_sums_match_inputs(
        events in prop::collection::vec(arb_event(), 0..40),
        fee in 0i64..=100,
    ) {
        let settlements = aggregate_settlements(&events, Decimal::from(fee));
        let total_gross: Decimal = settlements.iter().map(|s| s.gross_revenue).sum();
        let expected: Decimal = events.iter().map(|e| e.attributed_amount()).sum();
        prop_assert_eq!(total_gross, expected);

        for s in &settlements {
            prop_assert_eq!(s.platform_fee_amount + s.net_revenue, s.gross_revenue);
            prop_assert!(s.net_revenue >= Decimal::ZERO);
            let subtotal: Decimal = s.event_type_totals.iter().map(|t| t.gross_revenue).sum();
            prop_assert_eq!(subtotal, s.gross_revenue);
        }
    }

    #[test]
    fn every_event_in_exactly_one_settlement(
        events in prop::collection::vec(arb_event(), 0..40),
    ) {
        let settlements = aggregate_settlements(&events, Decimal::from(20));
        let mut seen = HashSet::new();
        for s in &settlements {
            for id in &s.event_ids {
                prop_assert!(seen.insert(id.clone()), "event {} settled twice", id);
            }
        }
        prop_assert_eq!(seen.len(), events.len());
        prop_assert!(SettlementBatch::new(settlements).is_ok());
    }

    #[test]
    fn one_settlement_per_distinct_partner(
        events in prop::collection::vec(arb_event(), 0..40),
    ) {
        let settlements = aggregate_settlements(&events, Decimal::from(20));
        let partners: HashSet<_> = events.iter().map(|e| e.partner_id.clone()).collect();
        prop_assert_eq!(settlements.len(), partners.len());
        let ids: Vec<_> = settlements.iter().map(|s| s.partner_id.clone()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        prop_assert_eq!(ids, sorted);
    }
}
