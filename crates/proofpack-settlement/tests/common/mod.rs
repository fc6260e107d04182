#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use proofpack_core::errors::{ProofpackError, ProofpackResult, SettlementError, StorageError};
use proofpack_core::models::{
    AttributionEvent, AttributionEventType, Settlement, SettlementBatch, SettlementPeriod,
};
use proofpack_core::traits::IAttributionStore;
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, day, hour, 0, 0).unwrap()
}

pub fn february() -> SettlementPeriod {
    SettlementPeriod::new(
        Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
    )
    .unwrap()
}

pub fn event(
    id: &str,
    partner: &str,
    event_type: AttributionEventType,
    amount: Decimal,
    pct: Decimal,
    timestamp: DateTime<Utc>,
) -> AttributionEvent {
    let mut e = AttributionEvent::new(partner, "sme-1", event_type, amount, pct, timestamp).unwrap();
    e.id = id.to_string();
    e
}

/// In-memory attribution store with an optional injected commit failure.
#[derive(Default)]
pub struct MemoryStore {
    pub events: Mutex<Vec<AttributionEvent>>,
    pub settlements: Mutex<Vec<Settlement>>,
    pub fail_commit: bool,
}

impl MemoryStore {
    pub fn with_events(events: Vec<AttributionEvent>) -> Self {
        Self {
            events: Mutex::new(events),
            ..Default::default()
        }
    }

    pub fn failing(events: Vec<AttributionEvent>) -> Self {
        Self {
            events: Mutex::new(events),
            fail_commit: true,
            ..Default::default()
        }
    }

    pub fn pending_count(&self) -> usize {
        self.events.lock().unwrap().iter().filter(|e| e.is_pending()).count()
    }
}

impl IAttributionStore for MemoryStore {
    fn insert_event(&self, event: &AttributionEvent) -> ProofpackResult<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    fn get_event(&self, id: &str) -> ProofpackResult<Option<AttributionEvent>> {
        Ok(self.events.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    fn pending_events(&self, period: &SettlementPeriod) -> ProofpackResult<Vec<AttributionEvent>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.is_pending() && period.contains(e.timestamp))
            .cloned()
            .collect())
    }

    fn events_for_partner(&self, partner_id: &str) -> ProofpackResult<Vec<AttributionEvent>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.partner_id == partner_id)
            .cloned()
            .collect())
    }

    fn commit_settlements(&self, batch: &SettlementBatch) -> ProofpackResult<()> {
        let mut events = self.events.lock().unwrap();
        let mut staged = events.clone();
        for (event_id, settlement_id) in batch.links() {
            let event = staged
                .iter_mut()
                .find(|e| e.id == event_id)
                .ok_or_else(|| ProofpackError::not_found("attribution_event", event_id))?;
            event.mark_settled(settlement_id)?;
        }
        if self.fail_commit {
            return Err(StorageError::SqliteError {
                message: "disk I/O error".into(),
            }
            .into());
        }
        *events = staged;
        self.settlements
            .lock()
            .unwrap()
            .extend(batch.settlements().iter().cloned());
        Ok(())
    }

    fn get_settlement(&self, id: Uuid) -> ProofpackResult<Option<Settlement>> {
        Ok(self
            .settlements
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    fn settlements_for_partner(&self, partner_id: &str) -> ProofpackResult<Vec<Settlement>> {
        Ok(self
            .settlements
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.partner_id == partner_id)
            .cloned()
            .collect())
    }
}

pub fn already_settled(err: &ProofpackError) -> bool {
    matches!(
        err,
        ProofpackError::SettlementError(SettlementError::AlreadySettled { .. })
    )
}
