use std::collections::BTreeMap;

use proofpack_core::models::{AttributionEvent, AttributionEventType, EventTypeTotal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregator::{clamp_fee, platform_fee};

/// A partner's earnings at a glance: what is already settled and what the
/// next run would pay out at the given fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerSummary {
    pub partner_id: String,
    pub pending_event_count: u64,
    pub pending_gross: Decimal,
    pub projected_fee: Decimal,
    pub projected_net: Decimal,
    pub settled_event_count: u64,
    pub settled_gross: Decimal,
    /// Pending and settled events together, by event type.
    pub event_type_totals: Vec<EventTypeTotal>,
}

/// Summarize `partner_id`'s events. Events for other partners, events that
/// fail validation, and events that would overflow a total are ignored.
pub fn summarize_partner(
    events: &[AttributionEvent],
    partner_id: &str,
    fee_percentage: Decimal,
) -> PartnerSummary {
    let fee_percentage = clamp_fee(fee_percentage);
    let mut pending_event_count = 0u64;
    let mut pending_gross = Decimal::ZERO;
    let mut settled_event_count = 0u64;
    let mut settled_gross = Decimal::ZERO;
    let mut by_type: BTreeMap<AttributionEventType, (u64, Decimal)> = BTreeMap::new();

    for event in events
        .iter()
        .filter(|e| e.partner_id == partner_id && e.validate().is_ok())
    {
        let Some(amount) = event.checked_attributed_amount() else {
            continue;
        };
        let status_gross = if event.is_pending() {
            pending_gross
        } else {
            settled_gross
        };
        let type_gross = by_type
            .get(&event.event_type)
            .map_or(Decimal::ZERO, |(_, g)| *g);
        let (Some(next_status_gross), Some(next_type_gross)) =
            (status_gross.checked_add(amount), type_gross.checked_add(amount))
        else {
            tracing::warn!(event_id = %event.id, partner_id, "event skipped: total exceeds the decimal range");
            continue;
        };

        if event.is_pending() {
            pending_event_count += 1;
            pending_gross = next_status_gross;
        } else {
            settled_event_count += 1;
            settled_gross = next_status_gross;
        }
        let entry = by_type.entry(event.event_type).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = next_type_gross;
    }

    let projected_fee = platform_fee(pending_gross, fee_percentage);
    PartnerSummary {
        partner_id: partner_id.to_string(),
        pending_event_count,
        pending_gross,
        projected_fee,
        projected_net: pending_gross - projected_fee,
        settled_event_count,
        settled_gross,
        event_type_totals: by_type
            .into_iter()
            .map(|(event_type, (event_count, gross_revenue))| EventTypeTotal {
                event_type,
                event_count,
                gross_revenue,
            })
            .collect(),
    }
}
