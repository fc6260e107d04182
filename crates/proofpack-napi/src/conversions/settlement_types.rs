//! AttributionEvent, Settlement, AggregationOutcome ↔ serde_json::Value conversions.

use chrono::{DateTime, Utc};
use proofpack_core::models::{
    AttributionEvent, AttributionEventType, Settlement, SettlementPeriod,
};
use proofpack_settlement::{AggregationOutcome, PartnerSummary};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{error_types, from_json, time_types, to_json};

/// Payload for recording a new attribution event. `id` and `timestamp` are
/// generated when absent.
#[derive(Debug, Deserialize)]
pub struct AttributionInput {
    #[serde(default)]
    pub id: Option<String>,
    pub partner_id: String,
    pub sme_id: String,
    pub event_type: AttributionEventType,
    pub revenue_amount: Decimal,
    pub attribution_percentage: Decimal,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl AttributionInput {
    /// Build a validated, pending event.
    pub fn into_event(self, now: DateTime<Utc>) -> napi::Result<AttributionEvent> {
        let mut event = AttributionEvent::new(
            self.partner_id,
            self.sme_id,
            self.event_type,
            self.revenue_amount,
            self.attribution_percentage,
            self.timestamp.unwrap_or(now),
        )
        .map_err(|e| error_types::to_napi_error(e.into()))?;
        if let Some(id) = self.id.filter(|id| !id.trim().is_empty()) {
            event.id = id;
        }
        Ok(event)
    }
}

pub fn attribution_input_from_json(value: serde_json::Value) -> napi::Result<AttributionInput> {
    from_json(value, "attribution event")
}

pub fn events_from_json(value: serde_json::Value) -> napi::Result<Vec<AttributionEvent>> {
    from_json(value, "attribution events")
}

/// Parse a decimal string such as `"20"` or `"12.5"`.
pub fn decimal_from_str(value: &str, field: &str) -> napi::Result<Decimal> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|e| error_types::invalid_argument(format!("Invalid {field} '{value}': {e}")))
}

/// Half-open `[start, end)` period from two RFC 3339 strings.
pub fn period_from_strings(start: &str, end: &str) -> napi::Result<SettlementPeriod> {
    let start = time_types::parse_timestamp(start, "period start")?;
    let end = time_types::parse_timestamp(end, "period end")?;
    SettlementPeriod::new(start, end).map_err(|e| error_types::to_napi_error(e.into()))
}

pub fn event_to_json(event: &AttributionEvent) -> napi::Result<serde_json::Value> {
    to_json(event, "AttributionEvent")
}

pub fn settlements_to_json(settlements: &[Settlement]) -> napi::Result<serde_json::Value> {
    to_json(settlements, "Settlement vec")
}

pub fn outcome_to_json(outcome: &AggregationOutcome) -> napi::Result<serde_json::Value> {
    to_json(outcome, "AggregationOutcome")
}

pub fn summary_to_json(summary: &PartnerSummary) -> napi::Result<serde_json::Value> {
    to_json(summary, "PartnerSummary")
}
