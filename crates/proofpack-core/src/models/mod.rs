mod actor;
mod attribution;
mod audit_entry;
mod category;
mod document;
mod gap;
mod pack_health;
mod page;
mod proof_pack;
mod settlement;

pub use actor::{Actor, Role};
pub use attribution::{AttributionEvent, AttributionEventType, SettlementStatus};
pub use audit_entry::{AuditActor, AuditEntity, AuditEntry, AuditOperation};
pub use category::DocumentCategory;
pub use document::{Document, DocumentMetadata, ExpiryState};
pub use gap::{Gap, GapKind};
pub use pack_health::{is_eligible_score, PackAssessment, PackHealth};
pub use page::Page;
pub use proof_pack::{PackReview, PackStatus, ProofPack, ReviewDecision};
pub use settlement::{EventTypeTotal, Settlement, SettlementBatch, SettlementPeriod};
