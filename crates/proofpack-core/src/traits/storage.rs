use uuid::Uuid;

use crate::errors::ProofpackResult;
use crate::models::{
    AttributionEvent, AuditEntry, PackStatus, Page, ProofPack, Settlement, SettlementBatch,
    SettlementPeriod,
};

/// Proof Pack persistence. Writes are last-write-wins.
pub trait IPackStore: Send + Sync {
    fn save_pack(&self, pack: &ProofPack) -> ProofpackResult<()>;
    fn get_pack(&self, id: &str) -> ProofpackResult<Option<ProofPack>>;
    fn delete_pack(&self, id: &str) -> ProofpackResult<()>;
    /// Packs filtered by owner and status, newest first.
    fn list_packs(
        &self,
        owner_id: Option<&str>,
        status: Option<PackStatus>,
        page: Page,
    ) -> ProofpackResult<Vec<ProofPack>>;
}

/// Attribution event and settlement persistence.
pub trait IAttributionStore: Send + Sync {
    fn insert_event(&self, event: &AttributionEvent) -> ProofpackResult<()>;
    fn get_event(&self, id: &str) -> ProofpackResult<Option<AttributionEvent>>;
    /// Pending events with a timestamp inside `period`, oldest first.
    fn pending_events(&self, period: &SettlementPeriod) -> ProofpackResult<Vec<AttributionEvent>>;
    /// Every event credited to a partner, oldest first.
    fn events_for_partner(&self, partner_id: &str) -> ProofpackResult<Vec<AttributionEvent>>;

    /// Insert every settlement and move every linked event from pending to
    /// settled, all-or-nothing. Fails without writing if any linked event is
    /// missing or already settled.
    fn commit_settlements(&self, batch: &SettlementBatch) -> ProofpackResult<()>;

    fn get_settlement(&self, id: Uuid) -> ProofpackResult<Option<Settlement>>;
    fn settlements_for_partner(&self, partner_id: &str) -> ProofpackResult<Vec<Settlement>>;
}

/// Append-only audit log.
pub trait IAuditLog: Send + Sync {
    fn append(&self, entry: &AuditEntry) -> ProofpackResult<()>;
    /// Entries for one entity, oldest first.
    fn entries_for(&self, entity_id: &str) -> ProofpackResult<Vec<AuditEntry>>;
}
