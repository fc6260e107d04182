use chrono::{DateTime, Duration, TimeZone, Utc};
use proofpack_core::config::HealthConfig;
use proofpack_core::errors::{PackError, ProofpackError};
use proofpack_core::models::{
    Actor, AuditActor, AuditOperation, Document, DocumentCategory, DocumentMetadata, PackStatus,
    ProofPack, ReviewDecision, Role,
};
use proofpack_health::{HealthEngine, PackWorkflow};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn owner() -> Actor {
    Actor::new("sme-1", Role::SmeUser)
}

fn reviewer() -> Actor {
    Actor::new("qa-1", Role::QaReviewer)
}

fn workflow() -> PackWorkflow {
    PackWorkflow::new(HealthEngine::new(HealthConfig::with_required([
        DocumentCategory::Insurance,
        DocumentCategory::License,
    ])))
}

fn doc(category: DocumentCategory) -> Document {
    Document::new("", category)
        .with_file_size(2048)
        .with_metadata(DocumentMetadata {
            title: Some("Title".into()),
            notes: Some("Notes".into()),
            ..Default::default()
        })
}

fn eligible_pack(wf: &PackWorkflow) -> ProofPack {
    let mut pack = ProofPack::new("sme-1", "Acme Proof Pack", now());
    wf.add_document(&mut pack, doc(DocumentCategory::Insurance), &owner(), now())
        .unwrap();
    wf.add_document(&mut pack, doc(DocumentCategory::License), &owner(), now())
        .unwrap();
    pack
}

// ── Document changes ─────────────────────────────────────────────────────

#[test]
fn adding_document_recomputes_health_and_audits() {
    let wf = workflow();
    let mut pack = ProofPack::new("sme-1", "Acme", now());

    let entry = wf
        .add_document(&mut pack, doc(DocumentCategory::Insurance), &owner(), now())
        .unwrap();

    assert_eq!(pack.documents.len(), 1);
    assert_eq!(pack.documents[0].pack_id, pack.id);
    assert_eq!(pack.health.completeness_score, 50.0);
    assert_eq!(pack.gaps.len(), 1);
    assert_eq!(entry.operation, AuditOperation::DocumentAdded);
    assert_eq!(entry.entity_id, pack.id);
    assert_eq!(entry.details["category"], "insurance");
    assert_eq!(entry.details["gap_count"], 1);
    assert_eq!(
        entry.actor,
        AuditActor::User {
            user_id: "sme-1".into(),
            role: Role::SmeUser
        }
    );
}

#[test]
fn removing_sole_coverer_reopens_gap() {
    let wf = workflow();
    let mut pack = eligible_pack(&wf);
    let before = pack.health.overall_score;
    let license_id = pack.documents[1].id.clone();

    let entry = wf
        .remove_document(&mut pack, &license_id, &owner(), now())
        .unwrap();

    assert!(pack.health.overall_score < before);
    assert_eq!(pack.gaps.len(), 1);
    assert_eq!(pack.gaps[0].category, DocumentCategory::License);
    assert_eq!(entry.operation, AuditOperation::DocumentRemoved);
}

#[test]
fn removing_unknown_document_is_not_found() {
    let wf = workflow();
    let mut pack = eligible_pack(&wf);

    let err = wf
        .remove_document(&mut pack, "nope", &owner(), now())
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn duplicate_and_foreign_documents_rejected() {
    let wf = workflow();
    let mut pack = ProofPack::new("sme-1", "Acme", now());
    let first = doc(DocumentCategory::Insurance).with_id("doc-1");
    wf.add_document(&mut pack, first.clone(), &owner(), now())
        .unwrap();

    let dup = wf
        .add_document(&mut pack, first, &owner(), now())
        .unwrap_err();
    assert!(matches!(
        dup,
        ProofpackError::PackError(PackError::DuplicateDocument { .. })
    ));

    let mut foreign = doc(DocumentCategory::License);
    foreign.pack_id = "other-pack".into();
    let err = wf
        .add_document(&mut pack, foreign, &owner(), now())
        .unwrap_err();
    assert!(matches!(
        err,
        ProofpackError::PackError(PackError::ForeignDocument { .. })
    ));
}

#[test]
fn only_owner_sme_may_edit() {
    let wf = workflow();
    let mut pack = ProofPack::new("sme-1", "Acme", now());

    for actor in [
        Actor::new("sme-2", Role::SmeUser),
        Actor::new("sme-1", Role::Buyer),
        reviewer(),
    ] {
        let err = wf
            .add_document(&mut pack, doc(DocumentCategory::Insurance), &actor, now())
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
    assert!(pack.documents.is_empty());

    let admin = Actor::new("admin", Role::PlatformAdmin);
    wf.add_document(&mut pack, doc(DocumentCategory::Insurance), &admin, now())
        .unwrap();
}

// ── Submission and review ────────────────────────────────────────────────

#[test]
fn submit_below_threshold_is_refused() {
    let wf = workflow();
    let mut pack = ProofPack::new("sme-1", "Acme", now());
    wf.add_document(&mut pack, doc(DocumentCategory::Insurance), &owner(), now())
        .unwrap();

    let err = wf.submit(&mut pack, &owner(), now()).unwrap_err();
    assert!(matches!(
        err,
        ProofpackError::PackError(PackError::NotEligible { .. })
    ));
    assert_eq!(err.status_code(), 400);
    assert_eq!(pack.status, PackStatus::Draft);
}

#[test]
fn submit_rescores_against_current_date() {
    let wf = workflow();
    let mut pack = ProofPack::new("sme-1", "Acme", now());
    let expires = now().date_naive() + Duration::days(90);
    for category in [DocumentCategory::Insurance, DocumentCategory::License] {
        let titled_only = Document::new("", category)
            .with_file_size(2048)
            .with_expiration(expires)
            .with_metadata(DocumentMetadata {
                title: Some("Title".into()),
                ..Default::default()
            });
        wf.add_document(&mut pack, titled_only, &owner(), now()).unwrap();
    }
    assert!(pack.health.is_eligible_for_introductions);

    let later = now() + Duration::days(120);
    let err = wf.submit(&mut pack, &owner(), later).unwrap_err();
    assert!(matches!(
        err,
        ProofpackError::PackError(PackError::NotEligible { .. })
    ));
    assert!(!pack.health.is_eligible_for_introductions);
    assert_eq!(pack.status, PackStatus::Draft);
}

#[test]
fn submit_then_approve() {
    let wf = workflow();
    let mut pack = eligible_pack(&wf);

    let submitted = wf.submit(&mut pack, &owner(), now()).unwrap();
    assert_eq!(submitted.operation, AuditOperation::PackSubmitted);
    assert_eq!(pack.status, PackStatus::Submitted);
    assert_eq!(pack.submitted_at, Some(now()));

    let approved = wf
        .approve(&mut pack, &reviewer(), Some("Looks good".into()), now())
        .unwrap();
    assert_eq!(approved.operation, AuditOperation::PackApproved);
    assert_eq!(pack.status, PackStatus::Approved);
    let review = pack.review.as_ref().unwrap();
    assert_eq!(review.decision, ReviewDecision::Approved);
    assert_eq!(review.reviewer_id, "qa-1");
}

#[test]
fn rejection_returns_pack_to_draft() {
    let wf = workflow();
    let mut pack = eligible_pack(&wf);
    wf.submit(&mut pack, &owner(), now()).unwrap();

    let entry = wf
        .reject(&mut pack, &reviewer(), Some("Upload a newer license".into()), now())
        .unwrap();

    assert_eq!(entry.operation, AuditOperation::PackRejected);
    assert_eq!(entry.details["notes"], "Upload a newer license");
    assert_eq!(pack.status, PackStatus::Draft);
    assert_eq!(pack.review.as_ref().unwrap().decision, ReviewDecision::Rejected);
    wf.add_document(&mut pack, doc(DocumentCategory::Reference), &owner(), now())
        .unwrap();
}

#[test]
fn submitted_pack_is_locked() {
    let wf = workflow();
    let mut pack = eligible_pack(&wf);
    wf.submit(&mut pack, &owner(), now()).unwrap();
    let doc_id = pack.documents[0].id.clone();

    let add = wf
        .add_document(&mut pack, doc(DocumentCategory::Reference), &owner(), now())
        .unwrap_err();
    let remove = wf
        .remove_document(&mut pack, &doc_id, &owner(), now())
        .unwrap_err();

    for err in [add, remove] {
        assert!(matches!(
            err,
            ProofpackError::PackError(PackError::Locked { .. })
        ));
        assert_eq!(err.status_code(), 409);
    }
}

#[test]
fn invalid_transitions_rejected() {
    let wf = workflow();
    let mut pack = eligible_pack(&wf);

    let err = wf.approve(&mut pack, &reviewer(), None, now()).unwrap_err();
    assert!(matches!(
        err,
        ProofpackError::PackError(PackError::InvalidTransition {
            from: PackStatus::Draft,
            to: PackStatus::Approved
        })
    ));

    wf.submit(&mut pack, &owner(), now()).unwrap();
    let again = wf.submit(&mut pack, &owner(), now()).unwrap_err();
    assert_eq!(again.status_code(), 409);
}

#[test]
fn only_reviewers_review() {
    let wf = workflow();
    let mut pack = eligible_pack(&wf);
    wf.submit(&mut pack, &owner(), now()).unwrap();

    let err = wf.approve(&mut pack, &owner(), None, now()).unwrap_err();
    assert_eq!(err.status_code(), 403);
    assert_eq!(pack.status, PackStatus::Submitted);
}

// ── Sharing ──────────────────────────────────────────────────────────────

#[test]
fn can_share_uses_same_threshold_as_submit() {
    let wf = workflow();
    let mut pack = ProofPack::new("sme-1", "Acme", now());
    wf.add_document(&mut pack, doc(DocumentCategory::Insurance), &owner(), now())
        .unwrap();
    assert!(!wf.can_share(&pack, now()));

    wf.add_document(&mut pack, doc(DocumentCategory::License), &owner(), now())
        .unwrap();
    assert!(wf.can_share(&pack, now()));

    wf.submit(&mut pack, &owner(), now()).unwrap();
    assert!(!wf.can_share(&pack, now()));

    wf.approve(&mut pack, &reviewer(), None, now()).unwrap();
    assert!(wf.can_share(&pack, now()));
}
