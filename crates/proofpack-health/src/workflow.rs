//! Proof Pack workflow: document changes with health recompute, review
//! transitions, and the eligibility gate for submission and sharing.
//!
//! Every mutating call authorizes the actor first, applies the change to the
//! pack in place, and returns the audit entry describing it. Persisting the
//! pack and the entry is the caller's job.

use chrono::{DateTime, Utc};
use proofpack_core::access::{authorize, Action};
use proofpack_core::constants::ELIGIBILITY_THRESHOLD;
use proofpack_core::errors::{PackError, ProofpackError, ProofpackResult};
use proofpack_core::models::{
    Actor, AuditActor, AuditEntity, AuditEntry, AuditOperation, Document, PackReview, PackStatus,
    ProofPack, ReviewDecision,
};
use proofpack_core::traits::IHealthScorer;
use proofpack_observability::events;
use serde_json::json;

use crate::HealthEngine;

pub struct PackWorkflow {
    engine: HealthEngine,
}

impl PackWorkflow {
    pub fn new(engine: HealthEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &HealthEngine {
        &self.engine
    }

    /// Re-derive health and gaps from the pack's current documents.
    pub fn recompute(&self, pack: &mut ProofPack, now: DateTime<Utc>) {
        let assessment = self.engine.assess(&pack.documents, now);
        pack.apply_assessment(assessment, now);
    }

    pub fn add_document(
        &self,
        pack: &mut ProofPack,
        mut document: Document,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> ProofpackResult<AuditEntry> {
        let _span = proofpack_observability::workflow_span!(pack.id, "add_document").entered();
        authorize(actor, Action::EditPack, Some(&pack.owner_id))?;
        ensure_unlocked(pack)?;

        if document.pack_id.is_empty() {
            document.pack_id = pack.id.clone();
        } else if document.pack_id != pack.id {
            return Err(PackError::ForeignDocument {
                pack_id: pack.id.clone(),
                document_id: document.id,
            }
            .into());
        }
        if pack.document(&document.id).is_some() {
            return Err(PackError::DuplicateDocument {
                pack_id: pack.id.clone(),
                document_id: document.id,
            }
            .into());
        }

        let details = json!({
            "document_id": document.id,
            "category": document.category.as_str(),
        });
        let document_id = document.id.clone();
        pack.documents.push(document);
        self.recompute(pack, now);

        events::document_changed(&pack.id, &document_id, "added", pack.health.overall_score);
        Ok(audit(
            pack,
            AuditOperation::DocumentAdded,
            actor,
            with_score(details, pack),
            now,
        ))
    }

    pub fn remove_document(
        &self,
        pack: &mut ProofPack,
        document_id: &str,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> ProofpackResult<AuditEntry> {
        let _span = proofpack_observability::workflow_span!(pack.id, "remove_document").entered();
        authorize(actor, Action::EditPack, Some(&pack.owner_id))?;
        ensure_unlocked(pack)?;

        let index = pack
            .documents
            .iter()
            .position(|d| d.id == document_id)
            .ok_or_else(|| ProofpackError::not_found("document", document_id))?;
        let removed = pack.documents.remove(index);
        self.recompute(pack, now);

        events::document_changed(&pack.id, document_id, "removed", pack.health.overall_score);
        let details = json!({
            "document_id": removed.id,
            "category": removed.category.as_str(),
        });
        Ok(audit(
            pack,
            AuditOperation::DocumentRemoved,
            actor,
            with_score(details, pack),
            now,
        ))
    }

    /// Submit a draft for QA review. Health is re-derived first so documents
    /// that expired since the last change count against the gate.
    pub fn submit(
        &self,
        pack: &mut ProofPack,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> ProofpackResult<AuditEntry> {
        let _span = proofpack_observability::workflow_span!(pack.id, "submit").entered();
        authorize(actor, Action::SubmitPack, Some(&pack.owner_id))?;
        if !pack.status.can_transition_to(PackStatus::Submitted) {
            return Err(PackError::InvalidTransition {
                from: pack.status,
                to: PackStatus::Submitted,
            }
            .into());
        }

        self.recompute(pack, now);
        if !pack.health.is_eligible_for_introductions {
            events::eligibility_denied(&pack.id, pack.health.overall_score, ELIGIBILITY_THRESHOLD);
            return Err(PackError::NotEligible {
                score: pack.health.overall_score,
                threshold: ELIGIBILITY_THRESHOLD,
            }
            .into());
        }

        self.transition(pack, PackStatus::Submitted, actor, now)?;
        Ok(audit(
            pack,
            AuditOperation::PackSubmitted,
            actor,
            with_score(json!({}), pack),
            now,
        ))
    }

    pub fn approve(
        &self,
        pack: &mut ProofPack,
        actor: &Actor,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> ProofpackResult<AuditEntry> {
        self.review(pack, actor, ReviewDecision::Approved, notes, now)
    }

    /// Reject a submitted pack, returning it to draft.
    pub fn reject(
        &self,
        pack: &mut ProofPack,
        actor: &Actor,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> ProofpackResult<AuditEntry> {
        self.review(pack, actor, ReviewDecision::Rejected, notes, now)
    }

    /// Whether the pack may be shared with buyers right now. Uses the same
    /// threshold as submission, re-derived as of `now`.
    pub fn can_share(&self, pack: &ProofPack, now: DateTime<Utc>) -> bool {
        if pack.is_locked() {
            return false;
        }
        let health = self.engine.compute_health(&pack.documents, now);
        if !health.is_eligible_for_introductions {
            events::eligibility_denied(&pack.id, health.overall_score, ELIGIBILITY_THRESHOLD);
        }
        health.is_eligible_for_introductions
    }

    fn review(
        &self,
        pack: &mut ProofPack,
        actor: &Actor,
        decision: ReviewDecision,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> ProofpackResult<AuditEntry> {
        let _span = proofpack_observability::workflow_span!(pack.id, "review").entered();
        authorize(actor, Action::ReviewPack, Some(&pack.owner_id))?;

        let (next, operation) = match decision {
            ReviewDecision::Approved => (PackStatus::Approved, AuditOperation::PackApproved),
            ReviewDecision::Rejected => (PackStatus::Draft, AuditOperation::PackRejected),
        };
        self.transition(pack, next, actor, now)?;
        pack.review = Some(PackReview {
            reviewer_id: actor.user_id.clone(),
            decision,
            notes: notes.clone(),
            reviewed_at: now,
        });

        Ok(audit(
            pack,
            operation,
            actor,
            json!({ "notes": notes }),
            now,
        ))
    }

    fn transition(
        &self,
        pack: &mut ProofPack,
        next: PackStatus,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> ProofpackResult<()> {
        let from = pack.status;
        pack.transition(next, now)?;
        events::pack_status_changed(&pack.id, from.as_str(), next.as_str(), &actor.user_id);
        Ok(())
    }
}

impl Default for PackWorkflow {
    fn default() -> Self {
        Self::new(HealthEngine::default())
    }
}

fn ensure_unlocked(pack: &ProofPack) -> Result<(), PackError> {
    if pack.is_locked() {
        return Err(PackError::Locked {
            status: pack.status,
        });
    }
    Ok(())
}

fn with_score(mut details: serde_json::Value, pack: &ProofPack) -> serde_json::Value {
    details["overall_score"] = json!(pack.health.overall_score);
    details["gap_count"] = json!(pack.gaps.len());
    details
}

fn audit(
    pack: &ProofPack,
    operation: AuditOperation,
    actor: &Actor,
    details: serde_json::Value,
    now: DateTime<Utc>,
) -> AuditEntry {
    AuditEntry::new(
        AuditEntity::Pack,
        pack.id.clone(),
        operation,
        AuditActor::from(actor),
        details,
        now,
    )
}
