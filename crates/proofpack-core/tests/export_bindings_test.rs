//! Test that generates TypeScript bindings from Rust types via ts-rs.
//!
//! Run with: cargo test -p proofpack-core export_bindings
//! Generated files appear in proofpack-core/bindings/*.ts
//!
//! CI should run this and then `git diff --exit-code` to catch drift.

#[test]
fn export_bindings() {
    // ts-rs writes a .ts file for every type with #[ts(export)] when the
    // derive-generated tests run. This test keeps the exported surface
    // importable and TS-derivable in one place.
    use proofpack_core::config::{HealthConfig, QualityConfig, ScoreWeights};
    use proofpack_core::models::{
        Actor, AttributionEvent, AttributionEventType, AuditActor, AuditEntity, AuditEntry,
        AuditOperation, Document, DocumentMetadata, EventTypeTotal, ExpiryState, Gap, GapKind,
        PackAssessment, PackHealth, PackReview, PackStatus, ProofPack, ReviewDecision, Role,
        Settlement, SettlementPeriod, SettlementStatus,
    };
    let names = [
        std::any::type_name::<Document>(),
        std::any::type_name::<DocumentMetadata>(),
        std::any::type_name::<ExpiryState>(),
        std::any::type_name::<Gap>(),
        std::any::type_name::<GapKind>(),
        std::any::type_name::<PackHealth>(),
        std::any::type_name::<PackAssessment>(),
        std::any::type_name::<PackStatus>(),
        std::any::type_name::<PackReview>(),
        std::any::type_name::<ReviewDecision>(),
        std::any::type_name::<ProofPack>(),
        std::any::type_name::<Actor>(),
        std::any::type_name::<Role>(),
        std::any::type_name::<AttributionEvent>(),
        std::any::type_name::<AttributionEventType>(),
        std::any::type_name::<SettlementStatus>(),
        std::any::type_name::<Settlement>(),
        std::any::type_name::<SettlementPeriod>(),
        std::any::type_name::<EventTypeTotal>(),
        std::any::type_name::<AuditEntry>(),
        std::any::type_name::<AuditEntity>(),
        std::any::type_name::<AuditOperation>(),
        std::any::type_name::<AuditActor>(),
        std::any::type_name::<HealthConfig>(),
        std::any::type_name::<ScoreWeights>(),
        std::any::type_name::<QualityConfig>(),
    ];
    assert!(names.iter().all(|n| !n.is_empty()));
}
