//! Queries for the packs table.

use proofpack_core::errors::{ProofpackError, ProofpackResult};
use proofpack_core::models::{PackStatus, Page, ProofPack};
use rusqlite::{params, Connection, OptionalExtension};

use super::{fmt_ts, parse_json};
use crate::to_storage_err;

/// Insert or replace a pack. Last write wins.
pub fn upsert_pack(conn: &Connection, pack: &ProofPack) -> ProofpackResult<()> {
    let body = serde_json::to_string(pack)?;
    conn.execute(
        "INSERT INTO packs (id, owner_id, title, status, overall_score, eligible, body, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(id) DO UPDATE SET
            owner_id = excluded.owner_id,
            title = excluded.title,
            status = excluded.status,
            overall_score = excluded.overall_score,
            eligible = excluded.eligible,
            body = excluded.body,
            updated_at = excluded.updated_at",
        params![
            pack.id,
            pack.owner_id,
            pack.title,
            pack.status.as_str(),
            pack.health.overall_score,
            pack.health.is_eligible_for_introductions as i32,
            body,
            fmt_ts(pack.created_at),
            fmt_ts(pack.updated_at),
        ],
    )
    .map_err(|e| to_storage_err(format!("upsert pack {}: {e}", pack.id)))?;
    Ok(())
}

pub fn get_pack(conn: &Connection, id: &str) -> ProofpackResult<Option<ProofPack>> {
    let body: Option<String> = conn
        .query_row("SELECT body FROM packs WHERE id = ?1", params![id], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    body.map(|b| parse_json("packs", &b)).transpose()
}

/// Delete a pack. Fails with not-found when no row matched.
pub fn delete_pack(conn: &Connection, id: &str) -> ProofpackResult<()> {
    let deleted = conn
        .execute("DELETE FROM packs WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    if deleted == 0 {
        return Err(ProofpackError::not_found("pack", id));
    }
    Ok(())
}

/// Packs filtered by owner and status, most recently updated first.
pub fn list_packs(
    conn: &Connection,
    owner_id: Option<&str>,
    status: Option<PackStatus>,
    page: Page,
) -> ProofpackResult<Vec<ProofPack>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT body FROM packs
             WHERE (?1 IS NULL OR owner_id = ?1)
               AND (?2 IS NULL OR status = ?2)
             ORDER BY updated_at DESC, id ASC
             LIMIT ?3 OFFSET ?4",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(
            params![
                owner_id,
                status.map(PackStatus::as_str),
                page.limit as i64,
                page.offset as i64
            ],
            |row| row.get::<_, String>(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.map(|row| {
        let body = row.map_err(|e| to_storage_err(e.to_string()))?;
        parse_json("packs", &body)
    })
    .collect()
}
