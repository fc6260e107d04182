//! Per-partner aggregation of attribution events.
//!
//! ```text
//! gross = Σ revenue_amount × attribution_percentage / 100
//! fee   = gross × fee_percentage / 100
//! net   = gross − fee
//! ```

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use proofpack_core::config::defaults;
use proofpack_core::models::{
    AttributionEvent, AttributionEventType, EventTypeTotal, Settlement, SettlementPeriod,
};
use proofpack_observability::events;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Settlements plus every event that was left out and why.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationOutcome {
    pub settlements: Vec<Settlement>,
    pub skipped: Vec<SkippedEvent>,
}

impl AggregationOutcome {
    /// Number of events rolled into settlements.
    pub fn settled_event_count(&self) -> usize {
        self.settlements.iter().map(|s| s.event_ids.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEvent {
    pub event_id: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Already part of another settlement.
    NotPending,
    /// Timestamp outside the settlement period.
    OutsidePeriod,
    /// Same id as an event already included.
    Duplicate,
    /// Fails event validation, or would push the partner's totals past the
    /// decimal range.
    Invalid { message: String },
}

impl SkipReason {
    pub fn describe(&self) -> String {
        match self {
            Self::NotPending => "event is not pending".to_string(),
            Self::OutsidePeriod => "event is outside the settlement period".to_string(),
            Self::Duplicate => "event id appears more than once".to_string(),
            Self::Invalid { message } => message.clone(),
        }
    }
}

/// Clamp a fee percentage into [0, 100].
pub fn clamp_fee(fee_percentage: Decimal) -> Decimal {
    if fee_percentage < Decimal::ZERO || fee_percentage > Decimal::ONE_HUNDRED {
        tracing::warn!(
            fee_percentage = %fee_percentage,
            "platform fee percentage out of range, clamping"
        );
    }
    fee_percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// `gross × fee_percentage / 100`, with the percentage applied after the
/// division when the product would not fit in a `Decimal`.
pub fn platform_fee(gross: Decimal, fee_percentage: Decimal) -> Decimal {
    gross
        .checked_mul(fee_percentage)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| gross / Decimal::ONE_HUNDRED * fee_percentage)
}

/// Aggregate `events` into one settlement per partner, ordered by partner id.
///
/// Never fails. Invalid, non-pending, out-of-period, and repeated events are
/// skipped and reported, as is any event that would overflow its partner's
/// gross. When `period` is `None` each settlement spans its partner's
/// earliest to latest event timestamp.
pub fn aggregate(
    events: &[AttributionEvent],
    fee_percentage: Decimal,
    currency: &str,
    period: Option<&SettlementPeriod>,
    now: DateTime<Utc>,
) -> AggregationOutcome {
    let fee_percentage = clamp_fee(fee_percentage);
    let mut skipped = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut by_partner: BTreeMap<&str, Vec<&AttributionEvent>> = BTreeMap::new();

    for event in events {
        let reason = if let Err(e) = event.validate() {
            Some(SkipReason::Invalid {
                message: e.to_string(),
            })
        } else if !event.is_pending() {
            Some(SkipReason::NotPending)
        } else if period.is_some_and(|p| !p.contains(event.timestamp)) {
            Some(SkipReason::OutsidePeriod)
        } else if !seen.insert(event.id.as_str()) {
            Some(SkipReason::Duplicate)
        } else {
            None
        };

        match reason {
            Some(reason) => skip(&mut skipped, event, reason),
            None => by_partner.entry(&event.partner_id).or_default().push(event),
        }
    }

    let settlements = by_partner
        .into_iter()
        .map(|(partner_id, group)| {
            build_settlement(
                partner_id,
                group,
                fee_percentage,
                currency,
                period,
                now,
                &mut skipped,
            )
        })
        .collect();

    AggregationOutcome {
        settlements,
        skipped,
    }
}

/// Aggregate every pending event with the default currency, stamped now.
pub fn aggregate_settlements(events: &[AttributionEvent], fee_percentage: Decimal) -> Vec<Settlement> {
    aggregate(
        events,
        fee_percentage,
        defaults::DEFAULT_CURRENCY,
        None,
        Utc::now(),
    )
    .settlements
}

fn skip(skipped: &mut Vec<SkippedEvent>, event: &AttributionEvent, reason: SkipReason) {
    events::event_skipped(&event.id, &reason.describe());
    skipped.push(SkippedEvent {
        event_id: event.id.clone(),
        reason,
    });
}

/// `group` is non-empty and every event in it has passed validation.
fn build_settlement(
    partner_id: &str,
    mut group: Vec<&AttributionEvent>,
    fee_percentage: Decimal,
    currency: &str,
    period: Option<&SettlementPeriod>,
    now: DateTime<Utc>,
    skipped: &mut Vec<SkippedEvent>,
) -> Settlement {
    group.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));

    let mut gross = Decimal::ZERO;
    let mut by_type: BTreeMap<AttributionEventType, (u64, Decimal)> = BTreeMap::new();
    let mut included = Vec::with_capacity(group.len());
    for event in group {
        let type_gross = by_type
            .get(&event.event_type)
            .map_or(Decimal::ZERO, |(_, g)| *g);
        let sums = event.checked_attributed_amount().and_then(|amount| {
            Some((gross.checked_add(amount)?, type_gross.checked_add(amount)?))
        });
        let Some((next_gross, next_type_gross)) = sums else {
            skip(
                skipped,
                event,
                SkipReason::Invalid {
                    message: format!("partner {partner_id} gross exceeds the decimal range"),
                },
            );
            continue;
        };
        gross = next_gross;
        let entry = by_type.entry(event.event_type).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = next_type_gross;
        included.push(event);
    }
    let group = included;

    let fee = platform_fee(gross, fee_percentage);
    let (period_start, period_end) = match period {
        Some(p) => (p.start, p.end),
        // group is non-empty and sorted by timestamp
        None => (
            group.first().map(|e| e.timestamp).unwrap_or(now),
            group.last().map(|e| e.timestamp).unwrap_or(now),
        ),
    };

    Settlement {
        id: Uuid::new_v4(),
        partner_id: partner_id.to_string(),
        period_start,
        period_end,
        currency: currency.to_string(),
        gross_revenue: gross,
        platform_fee_percentage: fee_percentage,
        platform_fee_amount: fee,
        net_revenue: gross - fee,
        event_count: group.len() as u64,
        event_type_totals: by_type
            .into_iter()
            .map(|(event_type, (event_count, gross_revenue))| EventTypeTotal {
                event_type,
                event_count,
                gross_revenue,
            })
            .collect(),
        event_ids: group.iter().map(|e| e.id.clone()).collect(),
        created_at: now,
    }
}
