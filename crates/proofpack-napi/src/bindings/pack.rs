//! Proof Pack bindings: create, read, list, document add/remove, submit,
//! review, and share gating. Each mutation is saved with its audit entry in
//! one transaction.

use chrono::Utc;
use napi_derive::napi;
use proofpack_core::errors::ProofpackError;
use proofpack_core::models::{Page, PackStatus, ProofPack, ReviewDecision};
use proofpack_core::traits::IPackStore;
use proofpack_core::{authorize, Action};

use crate::conversions::{error_types, pack_types, to_json};
use crate::runtime::{self, ProofpackRuntime};

fn load_pack(rt: &ProofpackRuntime, pack_id: &str) -> napi::Result<ProofPack> {
    rt.storage
        .get_pack(pack_id)
        .map_err(error_types::to_napi_error)?
        .ok_or_else(|| error_types::to_napi_error(ProofpackError::not_found("pack", pack_id)))
}

/// Create an empty draft pack. `owner_id` defaults to the actor.
#[napi]
pub fn proofpack_create_pack(
    title: String,
    actor: serde_json::Value,
    owner_id: Option<String>,
) -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;
    let actor = pack_types::actor_from_json(actor)?;
    let owner_id = owner_id.unwrap_or_else(|| actor.user_id.clone());
    authorize(&actor, Action::EditPack, Some(&owner_id)).map_err(error_types::to_napi_error)?;

    let now = Utc::now();
    let mut pack = ProofPack::new(owner_id, title, now);
    rt.workflow.recompute(&mut pack, now);
    rt.storage.save_pack(&pack).map_err(error_types::to_napi_error)?;
    pack_types::pack_to_json(&pack)
}

#[napi]
pub fn proofpack_get_pack(pack_id: String, actor: serde_json::Value) -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;
    let actor = pack_types::actor_from_json(actor)?;
    let pack = load_pack(&rt, &pack_id)?;
    authorize(&actor, Action::ViewPack, Some(&pack.owner_id)).map_err(error_types::to_napi_error)?;
    pack_types::pack_to_json(&pack)
}

/// Packs newest first, optionally filtered by owner and status.
#[napi]
pub fn proofpack_list_packs(
    actor: serde_json::Value,
    owner_id: Option<String>,
    status: Option<String>,
    offset: Option<u32>,
    limit: Option<u32>,
) -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;
    let actor = pack_types::actor_from_json(actor)?;
    authorize(&actor, Action::ViewPack, owner_id.as_deref()).map_err(error_types::to_napi_error)?;

    let status = status
        .map(|s| s.parse::<PackStatus>())
        .transpose()
        .map_err(error_types::invalid_argument)?;
    let defaults = Page::default();
    let page = Page::new(
        offset.map(|o| o as usize).unwrap_or(defaults.offset),
        limit.map(|l| l as usize).unwrap_or(defaults.limit),
    );
    let packs = rt
        .storage
        .list_packs(owner_id.as_deref(), status, page)
        .map_err(error_types::to_napi_error)?;
    to_json(&packs, "ProofPack vec")
}

/// Add a document and re-derive health. Returns `{ pack, audit }`.
#[napi]
pub fn proofpack_add_document(
    pack_id: String,
    document: serde_json::Value,
    actor: serde_json::Value,
) -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;
    let actor = pack_types::actor_from_json(actor)?;
    let document = pack_types::document_from_json(document)?;
    let mut pack = load_pack(&rt, &pack_id)?;

    let entry = rt
        .workflow
        .add_document(&mut pack, document, &actor, Utc::now())
        .map_err(error_types::to_napi_error)?;
    rt.storage
        .save_pack_with_audit(&pack, &entry)
        .map_err(error_types::to_napi_error)?;
    pack_types::pack_change_to_json(&pack, &entry)
}

/// Remove a document and re-derive health. Returns `{ pack, audit }`.
#[napi]
pub fn proofpack_remove_document(
    pack_id: String,
    document_id: String,
    actor: serde_json::Value,
) -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;
    let actor = pack_types::actor_from_json(actor)?;
    let mut pack = load_pack(&rt, &pack_id)?;

    let entry = rt
        .workflow
        .remove_document(&mut pack, &document_id, &actor, Utc::now())
        .map_err(error_types::to_napi_error)?;
    rt.storage
        .save_pack_with_audit(&pack, &entry)
        .map_err(error_types::to_napi_error)?;
    pack_types::pack_change_to_json(&pack, &entry)
}

/// Submit a draft for QA review. Fails with `INVALID_REQUEST` when the
/// re-derived score is below the eligibility threshold.
#[napi]
pub fn proofpack_submit_pack(pack_id: String, actor: serde_json::Value) -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;
    let actor = pack_types::actor_from_json(actor)?;
    let mut pack = load_pack(&rt, &pack_id)?;

    let entry = rt
        .workflow
        .submit(&mut pack, &actor, Utc::now())
        .map_err(error_types::to_napi_error)?;
    rt.storage
        .save_pack_with_audit(&pack, &entry)
        .map_err(error_types::to_napi_error)?;
    pack_types::pack_change_to_json(&pack, &entry)
}

/// Approve or reject a submitted pack. `decision` is `"approved"` or `"rejected"`.
#[napi]
pub fn proofpack_review_pack(
    pack_id: String,
    decision: String,
    actor: serde_json::Value,
    notes: Option<String>,
) -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;
    let actor = pack_types::actor_from_json(actor)?;
    let decision = pack_types::review_decision_from_str(&decision)?;
    let mut pack = load_pack(&rt, &pack_id)?;

    let now = Utc::now();
    let entry = match decision {
        ReviewDecision::Approved => rt.workflow.approve(&mut pack, &actor, notes, now),
        ReviewDecision::Rejected => rt.workflow.reject(&mut pack, &actor, notes, now),
    }
    .map_err(error_types::to_napi_error)?;
    rt.storage
        .save_pack_with_audit(&pack, &entry)
        .map_err(error_types::to_napi_error)?;
    pack_types::pack_change_to_json(&pack, &entry)
}

/// Whether the pack may be shared with buyers right now.
#[napi]
pub fn proofpack_can_share(pack_id: String, actor: serde_json::Value) -> napi::Result<bool> {
    let rt = runtime::get()?;
    let actor = pack_types::actor_from_json(actor)?;
    let pack = load_pack(&rt, &pack_id)?;
    authorize(&actor, Action::ViewPack, Some(&pack.owner_id)).map_err(error_types::to_napi_error)?;
    Ok(rt.workflow.can_share(&pack, Utc::now()))
}
