use chrono::{DateTime, TimeZone, Utc};
use proofpack_core::config::SettlementConfig;
use proofpack_core::errors::{ProofpackError, SettlementError};
use proofpack_core::models::{
    AttributionEvent, AttributionEventType, SettlementBatch, SettlementPeriod, SettlementStatus,
};
use proofpack_core::traits::IAttributionStore;
use proofpack_settlement::SettlementEngine;
use proofpack_storage::StorageEngine;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, day, 12, 0, 0).unwrap()
}

fn february() -> SettlementPeriod {
    SettlementPeriod::new(
        Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
    )
    .unwrap()
}

fn event(partner: &str, amount: Decimal, pct: Decimal, day: u32) -> AttributionEvent {
    AttributionEvent::new(
        partner,
        "sme-1",
        AttributionEventType::Subscription,
        amount,
        pct,
        at(day),
    )
    .unwrap()
}

fn seeded_store() -> (StorageEngine, Vec<AttributionEvent>) {
    let store = StorageEngine::open_in_memory().unwrap();
    let events = vec![
        event("partner-a", dec!(199.00), dec!(15), 3),
        event("partner-a", dec!(49.99), dec!(50), 10),
        event("partner-b", dec!(1000), dec!(12.5), 20),
    ];
    for e in &events {
        store.insert_event(e).unwrap();
    }
    (store, events)
}

fn engine() -> SettlementEngine {
    SettlementEngine::new(SettlementConfig::default())
}

// ── Events ───────────────────────────────────────────────────────────────

#[test]
fn event_round_trip_keeps_exact_decimals() {
    let (store, events) = seeded_store();
    let loaded = store.get_event(&events[1].id).unwrap().unwrap();
    assert_eq!(loaded, events[1]);
    assert_eq!(loaded.revenue_amount, dec!(49.99));
}

#[test]
fn duplicate_event_is_conflict() {
    let (store, events) = seeded_store();
    let err = store.insert_event(&events[0]).unwrap_err();
    assert!(matches!(
        err,
        ProofpackError::SettlementError(SettlementError::DuplicateEvent { .. })
    ));
    assert_eq!(err.status_code(), 409);
}

#[test]
fn pending_events_respect_half_open_period() {
    let (store, _) = seeded_store();
    let boundary = event("partner-c", dec!(1), dec!(100), 1);
    let mut at_end = event("partner-c", dec!(1), dec!(100), 1);
    at_end.timestamp = february().end;
    store.insert_event(&boundary).unwrap();
    store.insert_event(&at_end).unwrap();

    let pending = store.pending_events(&february()).unwrap();
    let ids: Vec<_> = pending.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(pending.len(), 4);
    assert!(ids.contains(&boundary.id.as_str()));
    assert!(!ids.contains(&at_end.id.as_str()));
    // Oldest first.
    assert!(pending.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn events_for_partner_only() {
    let (store, _) = seeded_store();
    let events = store.events_for_partner("partner-a").unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.partner_id == "partner-a"));
}

// ── Settlement commit ────────────────────────────────────────────────────

#[test]
fn run_commits_settlements_and_links_events() {
    let (store, events) = seeded_store();

    let outcome = engine().run(&store, &february(), Utc::now()).unwrap();
    assert_eq!(outcome.settlements.len(), 2);

    for e in &events {
        let stored = store.get_event(&e.id).unwrap().unwrap();
        assert_eq!(stored.settlement_status, SettlementStatus::Settled);
        let settlement = store
            .get_settlement(stored.settlement_id.unwrap())
            .unwrap()
            .unwrap();
        assert!(settlement.event_ids.contains(&e.id));
        assert_eq!(settlement.partner_id, e.partner_id);
    }

    let a = &store.settlements_for_partner("partner-a").unwrap()[0];
    assert_eq!(a.gross_revenue, dec!(54.845));
    assert_eq!(a.platform_fee_amount, dec!(10.969));
    assert_eq!(a.net_revenue, dec!(43.876));
    assert_eq!(a, &outcome.settlements[0]);

    assert!(store.pending_events(&february()).unwrap().is_empty());
}

#[test]
fn stale_batch_rolls_back_entirely() {
    let (store, events) = seeded_store();
    let stale = engine().preview(&store, &february(), Utc::now()).unwrap();

    // Settle one event out from under the stale batch.
    let only_b = engine().aggregate_events(&events[2..], Some(&february()), Utc::now());
    store
        .commit_settlements(&SettlementBatch::new(only_b.settlements).unwrap())
        .unwrap();

    let err = store
        .commit_settlements(&SettlementBatch::new(stale.settlements.clone()).unwrap())
        .unwrap_err();
    assert_eq!(err.status_code(), 409);

    // Nothing from the failed batch was written.
    for settlement in &stale.settlements {
        assert!(store.get_settlement(settlement.id).unwrap().is_none());
    }
    assert!(store.get_event(&events[0].id).unwrap().unwrap().is_pending());
    assert!(store.get_event(&events[1].id).unwrap().unwrap().is_pending());
}

#[test]
fn batch_with_unknown_event_is_not_found_and_writes_nothing() {
    let (store, _) = seeded_store();
    let ghost = event("partner-z", dec!(10), dec!(100), 5);
    let outcome = engine().aggregate_events(&[ghost], None, Utc::now());
    let batch = SettlementBatch::new(outcome.settlements.clone()).unwrap();

    let err = store.commit_settlements(&batch).unwrap_err();

    assert_eq!(err.status_code(), 404);
    assert!(store
        .get_settlement(outcome.settlements[0].id)
        .unwrap()
        .is_none());
}
