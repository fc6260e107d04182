use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::AttributionEventType;
use crate::errors::SettlementError;

/// Half-open time window `[start, end)` a settlement run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SettlementPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SettlementPeriod {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, SettlementError> {
        if start >= end {
            return Err(SettlementError::InvalidPeriod {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// Subtotal for one event type inside a settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EventTypeTotal {
    pub event_type: AttributionEventType,
    #[ts(type = "number")]
    pub event_count: u64,
    #[ts(type = "string")]
    pub gross_revenue: Decimal,
}

/// Payable aggregate of one partner's pending events over a period.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settlement {
    pub id: Uuid,
    pub partner_id: String,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub currency: String,
    #[ts(type = "string")]
    pub gross_revenue: Decimal,
    #[ts(type = "string")]
    pub platform_fee_percentage: Decimal,
    #[ts(type = "string")]
    pub platform_fee_amount: Decimal,
    #[ts(type = "string")]
    pub net_revenue: Decimal,
    #[ts(type = "number")]
    pub event_count: u64,
    pub event_type_totals: Vec<EventTypeTotal>,
    pub event_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Settlements plus the event links they imply, checked so that no event
/// belongs to two settlements. Stores write a batch all-or-nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementBatch {
    settlements: Vec<Settlement>,
}

impl SettlementBatch {
    pub fn new(settlements: Vec<Settlement>) -> Result<Self, SettlementError> {
        let mut seen = HashSet::new();
        for settlement in &settlements {
            for event_id in &settlement.event_ids {
                if !seen.insert(event_id.as_str()) {
                    return Err(SettlementError::DuplicateEvent {
                        event_id: event_id.clone(),
                    });
                }
            }
        }
        Ok(Self { settlements })
    }

    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    pub fn into_settlements(self) -> Vec<Settlement> {
        self.settlements
    }

    pub fn is_empty(&self) -> bool {
        self.settlements.is_empty()
    }

    /// Every `(event_id, settlement_id)` pair the batch will write.
    pub fn links(&self) -> impl Iterator<Item = (&str, Uuid)> + '_ {
        self.settlements
            .iter()
            .flat_map(|s| s.event_ids.iter().map(move |e| (e.as_str(), s.id)))
    }

    pub fn event_count(&self) -> usize {
        self.settlements.iter().map(|s| s.event_ids.len()).sum()
    }
}
