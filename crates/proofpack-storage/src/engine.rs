//! StorageEngine: owns the database, implements the pack, attribution, and
//! audit store traits.

use std::path::Path;

use proofpack_core::config::StorageConfig;
use proofpack_core::errors::ProofpackResult;
use proofpack_core::models::{
    AttributionEvent, AuditEntry, PackStatus, Page, ProofPack, Settlement, SettlementBatch,
    SettlementPeriod,
};
use proofpack_core::traits::{IAttributionStore, IAuditLog, IPackStore};
use uuid::Uuid;

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::migrations;
use crate::queries::{audit, events, packs, settlements};
use crate::to_storage_err;

/// The main storage engine.
pub struct StorageEngine {
    db: DatabaseManager,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> ProofpackResult<Self> {
        Self::open_with_timeout(
            path,
            proofpack_core::config::defaults::DEFAULT_BUSY_TIMEOUT_MS,
        )
    }

    pub fn open_with_timeout(path: &Path, busy_timeout_ms: u32) -> ProofpackResult<Self> {
        let db = DatabaseManager::open(path, busy_timeout_ms)?;
        tracing::debug!(path = %path.display(), "storage opened");
        Ok(Self { db })
    }

    /// Open the database named in `config`.
    pub fn from_config(config: &StorageConfig) -> ProofpackResult<Self> {
        Self::open_with_timeout(Path::new(&config.db_path), config.busy_timeout_ms)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> ProofpackResult<Self> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    pub fn db(&self) -> &DatabaseManager {
        &self.db
    }

    pub fn schema_version(&self) -> ProofpackResult<u32> {
        self.db.with_conn(migrations::current_version)
    }

    /// Flush the WAL into the main database file. No-op for in-memory stores.
    pub fn checkpoint(&self) -> ProofpackResult<()> {
        if self.db.path().is_none() {
            return Ok(());
        }
        self.db.with_conn(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
                .map_err(|e| to_storage_err(format!("WAL checkpoint failed: {e}")))
        })
    }

    /// Save a pack and append its audit entry in one transaction.
    pub fn save_pack_with_audit(&self, pack: &ProofPack, entry: &AuditEntry) -> ProofpackResult<()> {
        self.db.with_conn(|conn| {
            with_immediate_transaction(conn, |tx| {
                packs::upsert_pack(tx, pack)?;
                audit::insert_entry(tx, entry)
            })
        })
    }

    /// Insert an event and append its audit entry in one transaction.
    pub fn insert_event_with_audit(
        &self,
        event: &AttributionEvent,
        entry: &AuditEntry,
    ) -> ProofpackResult<()> {
        self.db.with_conn(|conn| {
            with_immediate_transaction(conn, |tx| {
                events::insert_event(tx, event)?;
                audit::insert_entry(tx, entry)
            })
        })
    }
}

impl IPackStore for StorageEngine {
    fn save_pack(&self, pack: &ProofPack) -> ProofpackResult<()> {
        self.db.with_conn(|conn| packs::upsert_pack(conn, pack))
    }

    fn get_pack(&self, id: &str) -> ProofpackResult<Option<ProofPack>> {
        self.db.with_conn(|conn| packs::get_pack(conn, id))
    }

    fn delete_pack(&self, id: &str) -> ProofpackResult<()> {
        self.db.with_conn(|conn| packs::delete_pack(conn, id))
    }

    fn list_packs(
        &self,
        owner_id: Option<&str>,
        status: Option<PackStatus>,
        page: Page,
    ) -> ProofpackResult<Vec<ProofPack>> {
        self.db
            .with_conn(|conn| packs::list_packs(conn, owner_id, status, page))
    }
}

impl IAttributionStore for StorageEngine {
    fn insert_event(&self, event: &AttributionEvent) -> ProofpackResult<()> {
        self.db.with_conn(|conn| events::insert_event(conn, event))
    }

    fn get_event(&self, id: &str) -> ProofpackResult<Option<AttributionEvent>> {
        self.db.with_conn(|conn| events::get_event(conn, id))
    }

    fn pending_events(&self, period: &SettlementPeriod) -> ProofpackResult<Vec<AttributionEvent>> {
        self.db
            .with_conn(|conn| events::pending_in_period(conn, period))
    }

    fn events_for_partner(&self, partner_id: &str) -> ProofpackResult<Vec<AttributionEvent>> {
        self.db.with_conn(|conn| events::for_partner(conn, partner_id))
    }

    fn commit_settlements(&self, batch: &SettlementBatch) -> ProofpackResult<()> {
        self.db.with_conn(|conn| {
            with_immediate_transaction(conn, |tx| {
                for settlement in batch.settlements() {
                    settlements::insert_settlement(tx, settlement)?;
                }
                for (event_id, settlement_id) in batch.links() {
                    events::mark_settled(tx, event_id, settlement_id)?;
                }
                Ok(())
            })
        })
    }

    fn get_settlement(&self, id: Uuid) -> ProofpackResult<Option<Settlement>> {
        self.db.with_conn(|conn| settlements::get_settlement(conn, id))
    }

    fn settlements_for_partner(&self, partner_id: &str) -> ProofpackResult<Vec<Settlement>> {
        self.db
            .with_conn(|conn| settlements::for_partner(conn, partner_id))
    }
}

impl IAuditLog for StorageEngine {
    fn append(&self, entry: &AuditEntry) -> ProofpackResult<()> {
        self.db.with_conn(|conn| audit::insert_entry(conn, entry))
    }

    fn entries_for(&self, entity_id: &str) -> ProofpackResult<Vec<AuditEntry>> {
        self.db.with_conn(|conn| audit::for_entity(conn, entity_id))
    }
}
