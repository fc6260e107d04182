//! Queries for the append-only audit_log table.

use proofpack_core::errors::ProofpackResult;
use proofpack_core::models::AuditEntry;
use rusqlite::{params, Connection};

use super::{fmt_ts, parse_enum, parse_json, parse_ts};
use crate::to_storage_err;

const TABLE: &str = "audit_log";

pub fn insert_entry(conn: &Connection, entry: &AuditEntry) -> ProofpackResult<()> {
    let actor = serde_json::to_string(&entry.actor)?;
    let details = serde_json::to_string(&entry.details)?;
    conn.execute(
        "INSERT INTO audit_log (entity_id, entity, operation, actor, details, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.entity_id,
            entry.entity.as_str(),
            entry.operation.as_str(),
            actor,
            details,
            fmt_ts(entry.timestamp),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert audit entry: {e}")))?;
    Ok(())
}

/// Entries for one entity in insertion order.
pub fn for_entity(conn: &Connection, entity_id: &str) -> ProofpackResult<Vec<AuditEntry>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT entity_id, entity, operation, actor, details, timestamp
             FROM audit_log WHERE entity_id = ?1 ORDER BY id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![entity_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.map(|row| {
        let (entity_id, entity, operation, actor, details, timestamp) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        Ok(AuditEntry {
            entity_id,
            entity: parse_enum(TABLE, &entity)?,
            operation: parse_enum(TABLE, &operation)?,
            actor: parse_json(TABLE, &actor)?,
            details: parse_json(TABLE, &details)?,
            timestamp: parse_ts(TABLE, &timestamp)?,
        })
    })
    .collect()
}
