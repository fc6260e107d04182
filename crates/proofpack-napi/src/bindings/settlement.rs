//! Settlement bindings: aggregateSettlements, attribution recording,
//! settlement runs, and partner earnings.

use chrono::Utc;
use napi_derive::napi;
use proofpack_core::models::{AuditActor, AuditEntity, AuditEntry, AuditOperation};
use proofpack_core::traits::{IAttributionStore, IAuditLog};
use proofpack_core::{authorize, Action};
use serde_json::json;

use crate::conversions::{error_types, pack_types, settlement_types};
use crate::runtime;

/// Group events into one settlement per partner. Pure; `fee_percentage` is a
/// decimal string and defaults to the configured platform fee.
#[napi]
pub fn aggregate_settlements(
    events: serde_json::Value,
    fee_percentage: Option<String>,
) -> napi::Result<serde_json::Value> {
    let events = settlement_types::events_from_json(events)?;
    let fee = match fee_percentage {
        Some(fee) => settlement_types::decimal_from_str(&fee, "fee percentage")?,
        None => runtime::config_or_default().settlement.platform_fee_percentage,
    };
    settlement_types::settlements_to_json(&proofpack_settlement::aggregate_settlements(&events, fee))
}

/// Record a pending attribution event. Platform admins only.
#[napi]
pub fn proofpack_record_attribution(
    event: serde_json::Value,
    actor: serde_json::Value,
) -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;
    let actor = pack_types::actor_from_json(actor)?;
    authorize(&actor, Action::RecordAttribution, None).map_err(error_types::to_napi_error)?;

    let now = Utc::now();
    let event = settlement_types::attribution_input_from_json(event)?.into_event(now)?;
    let entry = AuditEntry::new(
        AuditEntity::AttributionEvent,
        event.id.clone(),
        AuditOperation::AttributionRecorded,
        AuditActor::from(&actor),
        json!({
            "partner_id": event.partner_id,
            "event_type": event.event_type.as_str(),
            "attributed_amount": event.attributed_amount().to_string(),
        }),
        now,
    );
    rt.storage
        .insert_event_with_audit(&event, &entry)
        .map_err(error_types::to_napi_error)?;
    settlement_types::event_to_json(&event)
}

/// What a settlement run over `[period_start, period_end)` would produce.
#[napi]
pub fn proofpack_preview_settlement(
    period_start: String,
    period_end: String,
    actor: serde_json::Value,
) -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;
    let actor = pack_types::actor_from_json(actor)?;
    authorize(&actor, Action::RunSettlement, None).map_err(error_types::to_napi_error)?;

    let period = settlement_types::period_from_strings(&period_start, &period_end)?;
    let outcome = rt
        .settlement
        .preview(&rt.storage, &period, Utc::now())
        .map_err(error_types::to_napi_error)?;
    settlement_types::outcome_to_json(&outcome)
}

/// Settle every pending event in `[period_start, period_end)`. Settlements
/// and event links commit as one batch; on failure nothing is written.
#[napi]
pub fn proofpack_run_settlement(
    period_start: String,
    period_end: String,
    actor: serde_json::Value,
) -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;
    let actor = pack_types::actor_from_json(actor)?;
    authorize(&actor, Action::RunSettlement, None).map_err(error_types::to_napi_error)?;

    let period = settlement_types::period_from_strings(&period_start, &period_end)?;
    let now = Utc::now();
    let outcome = rt
        .settlement
        .run(&rt.storage, &period, now)
        .map_err(error_types::to_napi_error)?;

    for entry in proofpack_settlement::audit_entries(&outcome.settlements, AuditActor::from(&actor), now) {
        rt.storage.append(&entry).map_err(error_types::to_napi_error)?;
    }
    settlement_types::outcome_to_json(&outcome)
}

/// A partner's pending and settled earnings plus their settlement history.
#[napi]
pub fn proofpack_partner_summary(
    partner_id: String,
    actor: serde_json::Value,
) -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;
    let actor = pack_types::actor_from_json(actor)?;
    authorize(&actor, Action::ViewEarnings, Some(&partner_id)).map_err(error_types::to_napi_error)?;

    let events = rt
        .storage
        .events_for_partner(&partner_id)
        .map_err(error_types::to_napi_error)?;
    let settlements = rt
        .storage
        .settlements_for_partner(&partner_id)
        .map_err(error_types::to_napi_error)?;
    let summary = proofpack_settlement::summarize_partner(
        &events,
        &partner_id,
        rt.settlement.config().platform_fee_percentage,
    );
    Ok(json!({
        "summary": settlement_types::summary_to_json(&summary)?,
        "settlements": settlement_types::settlements_to_json(&settlements)?,
    }))
}
