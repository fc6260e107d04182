//! Queries for the attribution_events table.

use proofpack_core::errors::{ProofpackResult, SettlementError};
use proofpack_core::models::{AttributionEvent, SettlementPeriod, SettlementStatus};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{fmt_ts, parse_decimal, parse_enum, parse_ts};
use crate::{corrupt_row, to_storage_err};

const TABLE: &str = "attribution_events";

const COLUMNS: &str = "id, partner_id, sme_id, event_type, revenue_amount,
    attribution_percentage, timestamp, settlement_status, settlement_id";

/// Columns as stored, before decoding.
struct EventRow {
    id: String,
    partner_id: String,
    sme_id: String,
    event_type: String,
    revenue_amount: String,
    attribution_percentage: String,
    timestamp: String,
    settlement_status: String,
    settlement_id: Option<String>,
}

impl EventRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            partner_id: row.get(1)?,
            sme_id: row.get(2)?,
            event_type: row.get(3)?,
            revenue_amount: row.get(4)?,
            attribution_percentage: row.get(5)?,
            timestamp: row.get(6)?,
            settlement_status: row.get(7)?,
            settlement_id: row.get(8)?,
        })
    }

    fn decode(self) -> ProofpackResult<AttributionEvent> {
        let settlement_id = self
            .settlement_id
            .as_deref()
            .map(|raw| {
                Uuid::parse_str(raw)
                    .map_err(|e| corrupt_row(TABLE, format!("bad settlement_id {raw:?}: {e}")))
            })
            .transpose()?;
        Ok(AttributionEvent {
            id: self.id,
            partner_id: self.partner_id,
            sme_id: self.sme_id,
            event_type: parse_enum(TABLE, &self.event_type)?,
            revenue_amount: parse_decimal(TABLE, &self.revenue_amount)?,
            attribution_percentage: parse_decimal(TABLE, &self.attribution_percentage)?,
            timestamp: parse_ts(TABLE, &self.timestamp)?,
            settlement_status: parse_enum(TABLE, &self.settlement_status)?,
            settlement_id,
        })
    }
}

/// Insert a new event. A second insert with the same id is a conflict.
pub fn insert_event(conn: &Connection, event: &AttributionEvent) -> ProofpackResult<()> {
    if event_exists(conn, &event.id)? {
        return Err(SettlementError::DuplicateEvent {
            event_id: event.id.clone(),
        }
        .into());
    }
    conn.execute(
        "INSERT INTO attribution_events (
            id, partner_id, sme_id, event_type, revenue_amount,
            attribution_percentage, timestamp, settlement_status, settlement_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            event.id,
            event.partner_id,
            event.sme_id,
            event.event_type.as_str(),
            event.revenue_amount.to_string(),
            event.attribution_percentage.to_string(),
            fmt_ts(event.timestamp),
            event.settlement_status.as_str(),
            event.settlement_id.map(|id| id.to_string()),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert event {}: {e}", event.id)))?;
    Ok(())
}

fn event_exists(conn: &Connection, id: &str) -> ProofpackResult<bool> {
    conn.query_row(
        "SELECT 1 FROM attribution_events WHERE id = ?1",
        params![id],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn get_event(conn: &Connection, id: &str) -> ProofpackResult<Option<AttributionEvent>> {
    let sql = format!("SELECT {COLUMNS} FROM attribution_events WHERE id = ?1");
    conn.query_row(&sql, params![id], EventRow::from_row)
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .map(EventRow::decode)
        .transpose()
}

/// Pending events with `period.start <= timestamp < period.end`, oldest first.
pub fn pending_in_period(
    conn: &Connection,
    period: &SettlementPeriod,
) -> ProofpackResult<Vec<AttributionEvent>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM attribution_events
         WHERE settlement_status = 'pending' AND timestamp >= ?1 AND timestamp < ?2
         ORDER BY timestamp ASC, id ASC"
    );
    query_events(
        conn,
        &sql,
        params![fmt_ts(period.start), fmt_ts(period.end)],
    )
}

/// Every event credited to a partner, oldest first.
pub fn for_partner(conn: &Connection, partner_id: &str) -> ProofpackResult<Vec<AttributionEvent>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM attribution_events
         WHERE partner_id = ?1
         ORDER BY timestamp ASC, id ASC"
    );
    query_events(conn, &sql, params![partner_id])
}

fn query_events(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> ProofpackResult<Vec<AttributionEvent>> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, EventRow::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.map(|row| row.map_err(|e| to_storage_err(e.to_string()))?.decode())
        .collect()
}

/// Move one event from pending to settled.
///
/// Fails with not-found if the event does not exist and with a conflict if it
/// is already settled; the caller's transaction then rolls back.
pub fn mark_settled(conn: &Connection, event_id: &str, settlement_id: Uuid) -> ProofpackResult<()> {
    let updated = conn
        .execute(
            "UPDATE attribution_events
             SET settlement_status = ?1, settlement_id = ?2
             WHERE id = ?3 AND settlement_status = 'pending'",
            params![
                SettlementStatus::Settled.as_str(),
                settlement_id.to_string(),
                event_id
            ],
        )
        .map_err(|e| to_storage_err(format!("settle event {event_id}: {e}")))?;
    if updated == 1 {
        return Ok(());
    }

    match get_event(conn, event_id)? {
        None => Err(proofpack_core::ProofpackError::not_found(
            "attribution_event",
            event_id,
        )),
        Some(existing) => Err(SettlementError::AlreadySettled {
            event_id: event_id.to_string(),
            settlement_id: existing.settlement_id.unwrap_or(settlement_id),
        }
        .into()),
    }
}
