//! Document, Actor, HealthConfig, ProofPack ↔ serde_json::Value conversions.

use proofpack_core::config::HealthConfig;
use proofpack_core::models::{
    Actor, AuditEntry, Document, Gap, PackHealth, ProofPack, ReviewDecision,
};
use serde_json::json;

use super::{error_types, from_json, to_json};
use crate::runtime;

pub fn documents_from_json(value: serde_json::Value) -> napi::Result<Vec<Document>> {
    from_json(value, "documents")
}

pub fn document_from_json(value: serde_json::Value) -> napi::Result<Document> {
    from_json(value, "document")
}

pub fn actor_from_json(value: serde_json::Value) -> napi::Result<Actor> {
    from_json(value, "actor")
}

/// Explicit overrides when given (missing keys keep their defaults),
/// otherwise the runtime's health config.
pub fn health_config_from_json(value: Option<serde_json::Value>) -> napi::Result<HealthConfig> {
    match value {
        Some(v) if !v.is_null() => from_json(v, "health config"),
        _ => Ok(runtime::config_or_default().health),
    }
}

/// `"approved"` or `"rejected"`.
pub fn review_decision_from_str(value: &str) -> napi::Result<ReviewDecision> {
    match value {
        "approved" => Ok(ReviewDecision::Approved),
        "rejected" => Ok(ReviewDecision::Rejected),
        other => Err(error_types::invalid_argument(format!(
            "Invalid review decision '{other}': expected 'approved' or 'rejected'"
        ))),
    }
}

pub fn health_to_json(health: &PackHealth) -> napi::Result<serde_json::Value> {
    to_json(health, "PackHealth")
}

pub fn gaps_to_json(gaps: &[Gap]) -> napi::Result<serde_json::Value> {
    to_json(gaps, "Gap vec")
}

pub fn pack_to_json(pack: &ProofPack) -> napi::Result<serde_json::Value> {
    to_json(pack, "ProofPack")
}

/// The updated pack together with the audit entry its change produced.
pub fn pack_change_to_json(pack: &ProofPack, entry: &AuditEntry) -> napi::Result<serde_json::Value> {
    Ok(json!({
        "pack": pack_to_json(pack)?,
        "audit": to_json(entry, "AuditEntry")?,
    }))
}
