mod common;

use chrono::Utc;
use common::{already_settled, at, event, february, MemoryStore};
use proofpack_core::config::SettlementConfig;
use proofpack_core::models::AttributionEventType::*;
use proofpack_core::models::{AuditActor, AuditOperation, SettlementBatch};
use proofpack_core::traits::{IAttributionStore, ISettlementAggregator};
use proofpack_settlement::{audit_entries, SettlementEngine};
use rust_decimal_macros::dec;

fn engine() -> SettlementEngine {
    SettlementEngine::new(SettlementConfig {
        platform_fee_percentage: dec!(20),
        currency: "USD".into(),
    })
}

fn seeded() -> Vec<proofpack_core::models::AttributionEvent> {
    vec![
        event("e1", "partner-a", Purchase, dec!(199.00), dec!(15), at(3, 0)),
        event("e2", "partner-a", Introduction, dec!(100), dec!(50), at(4, 0)),
        event("e3", "partner-b", Subscription, dec!(30), dec!(10), at(5, 0)),
    ]
}

// ── Runs ─────────────────────────────────────────────────────────────────

#[test]
fn run_settles_every_pending_event_in_period() {
    let store = MemoryStore::with_events(seeded());

    let outcome = engine().run(&store, &february(), Utc::now()).unwrap();

    assert_eq!(outcome.settlements.len(), 2);
    assert_eq!(store.pending_count(), 0);
    for settlement in &outcome.settlements {
        for id in &settlement.event_ids {
            let stored = store.get_event(id).unwrap().unwrap();
            assert_eq!(stored.settlement_id, Some(settlement.id));
        }
        assert!(store.get_settlement(settlement.id).unwrap().is_some());
    }
}

#[test]
fn second_run_finds_nothing() {
    let store = MemoryStore::with_events(seeded());
    engine().run(&store, &february(), Utc::now()).unwrap();

    let again = engine().run(&store, &february(), Utc::now()).unwrap();
    assert!(again.settlements.is_empty());
    assert_eq!(store.settlements_for_partner("partner-a").unwrap().len(), 1);
}

#[test]
fn preview_writes_nothing() {
    let store = MemoryStore::with_events(seeded());

    let preview = engine().preview(&store, &february(), Utc::now()).unwrap();

    assert_eq!(preview.settlements.len(), 2);
    assert_eq!(store.pending_count(), 3);
    assert!(store.settlements.lock().unwrap().is_empty());
}

#[test]
fn failed_commit_leaves_every_event_pending() {
    let store = MemoryStore::failing(seeded());

    let err = engine().run(&store, &february(), Utc::now()).unwrap_err();

    assert_eq!(err.status_code(), 500);
    assert_eq!(store.pending_count(), 3);
    assert!(store.settlements.lock().unwrap().is_empty());
}

#[test]
fn committing_a_stale_batch_fails_atomically() {
    let store = MemoryStore::with_events(seeded());
    let stale = engine().preview(&store, &february(), Utc::now()).unwrap();
    engine().run(&store, &february(), Utc::now()).unwrap();

    let batch = SettlementBatch::new(stale.settlements).unwrap();
    let err = store.commit_settlements(&batch).unwrap_err();

    assert!(already_settled(&err));
    assert_eq!(err.status_code(), 409);
    assert_eq!(store.settlements.lock().unwrap().len(), 2);
}

#[test]
fn run_ignores_events_outside_period() {
    let mut events = seeded();
    events.push(event("march", "partner-a", Renewal, dec!(10), dec!(100), february().end));
    let store = MemoryStore::with_events(events);

    engine().run(&store, &february(), Utc::now()).unwrap();

    assert!(store.get_event("march").unwrap().unwrap().is_pending());
}

// ── Trait and audit ──────────────────────────────────────────────────────

#[test]
fn aggregator_trait_uses_configured_fee() {
    let settlements = engine().aggregate(&seeded());
    assert_eq!(settlements[0].platform_fee_percentage, dec!(20));
    assert_eq!(settlements[0].gross_revenue, dec!(79.85));
}

#[test]
fn audit_entry_per_settlement() {
    let settlements = engine().aggregate(&seeded());
    let entries = audit_entries(&settlements, AuditActor::System, Utc::now());

    assert_eq!(entries.len(), settlements.len());
    assert_eq!(entries[0].operation, AuditOperation::SettlementCreated);
    assert_eq!(entries[0].entity_id, settlements[0].id.to_string());
    assert_eq!(entries[0].details["gross_revenue"], "79.85");
}
