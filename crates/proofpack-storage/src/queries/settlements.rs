//! Queries for the settlements table.

use proofpack_core::errors::ProofpackResult;
use proofpack_core::models::Settlement;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{fmt_ts, parse_decimal, parse_json, parse_ts};
use crate::{corrupt_row, to_storage_err};

const TABLE: &str = "settlements";

const COLUMNS: &str = "id, partner_id, period_start, period_end, currency, gross_revenue,
    platform_fee_percentage, platform_fee_amount, net_revenue, event_count,
    event_type_totals, event_ids, created_at";

struct SettlementRow {
    id: String,
    partner_id: String,
    period_start: String,
    period_end: String,
    currency: String,
    gross_revenue: String,
    platform_fee_percentage: String,
    platform_fee_amount: String,
    net_revenue: String,
    event_count: i64,
    event_type_totals: String,
    event_ids: String,
    created_at: String,
}

impl SettlementRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            partner_id: row.get(1)?,
            period_start: row.get(2)?,
            period_end: row.get(3)?,
            currency: row.get(4)?,
            gross_revenue: row.get(5)?,
            platform_fee_percentage: row.get(6)?,
            platform_fee_amount: row.get(7)?,
            net_revenue: row.get(8)?,
            event_count: row.get(9)?,
            event_type_totals: row.get(10)?,
            event_ids: row.get(11)?,
            created_at: row.get(12)?,
        })
    }

    fn decode(self) -> ProofpackResult<Settlement> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| corrupt_row(TABLE, format!("bad id {:?}: {e}", self.id)))?;
        let event_count = u64::try_from(self.event_count)
            .map_err(|_| corrupt_row(TABLE, format!("negative event_count in {id}")))?;
        Ok(Settlement {
            id,
            partner_id: self.partner_id,
            period_start: parse_ts(TABLE, &self.period_start)?,
            period_end: parse_ts(TABLE, &self.period_end)?,
            currency: self.currency,
            gross_revenue: parse_decimal(TABLE, &self.gross_revenue)?,
            platform_fee_percentage: parse_decimal(TABLE, &self.platform_fee_percentage)?,
            platform_fee_amount: parse_decimal(TABLE, &self.platform_fee_amount)?,
            net_revenue: parse_decimal(TABLE, &self.net_revenue)?,
            event_count,
            event_type_totals: parse_json(TABLE, &self.event_type_totals)?,
            event_ids: parse_json(TABLE, &self.event_ids)?,
            created_at: parse_ts(TABLE, &self.created_at)?,
        })
    }
}

pub fn insert_settlement(conn: &Connection, settlement: &Settlement) -> ProofpackResult<()> {
    let totals = serde_json::to_string(&settlement.event_type_totals)?;
    let event_ids = serde_json::to_string(&settlement.event_ids)?;
    conn.execute(
        "INSERT INTO settlements (
            id, partner_id, period_start, period_end, currency, gross_revenue,
            platform_fee_percentage, platform_fee_amount, net_revenue, event_count,
            event_type_totals, event_ids, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            settlement.id.to_string(),
            settlement.partner_id,
            fmt_ts(settlement.period_start),
            fmt_ts(settlement.period_end),
            settlement.currency,
            settlement.gross_revenue.to_string(),
            settlement.platform_fee_percentage.to_string(),
            settlement.platform_fee_amount.to_string(),
            settlement.net_revenue.to_string(),
            settlement.event_count as i64,
            totals,
            event_ids,
            fmt_ts(settlement.created_at),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert settlement {}: {e}", settlement.id)))?;
    Ok(())
}

pub fn get_settlement(conn: &Connection, id: Uuid) -> ProofpackResult<Option<Settlement>> {
    let sql = format!("SELECT {COLUMNS} FROM settlements WHERE id = ?1");
    conn.query_row(&sql, params![id.to_string()], SettlementRow::from_row)
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .map(SettlementRow::decode)
        .transpose()
}

/// A partner's settlements, oldest first.
pub fn for_partner(conn: &Connection, partner_id: &str) -> ProofpackResult<Vec<Settlement>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM settlements
         WHERE partner_id = ?1
         ORDER BY created_at ASC, id ASC"
    );
    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![partner_id], SettlementRow::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.map(|row| row.map_err(|e| to_storage_err(e.to_string()))?.decode())
        .collect()
}
