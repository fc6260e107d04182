//! SQL for each table plus the column codecs they share.

pub mod audit;
pub mod events;
pub mod packs;
pub mod settlements;

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use proofpack_core::errors::ProofpackResult;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::corrupt_row;

/// Fixed-width UTC timestamp, so lexical order matches time order.
pub(crate) fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_ts(table: &str, raw: &str) -> ProofpackResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| corrupt_row(table, format!("bad timestamp {raw:?}: {e}")))
}

pub(crate) fn parse_decimal(table: &str, raw: &str) -> ProofpackResult<Decimal> {
    Decimal::from_str(raw).map_err(|e| corrupt_row(table, format!("bad decimal {raw:?}: {e}")))
}

/// Decode a snake_case enum stored as its bare serde name.
pub(crate) fn parse_enum<T: DeserializeOwned>(table: &str, raw: &str) -> ProofpackResult<T> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|e| corrupt_row(table, format!("bad enum value {raw:?}: {e}")))
}

/// Decode a JSON column.
pub(crate) fn parse_json<T: DeserializeOwned>(table: &str, raw: &str) -> ProofpackResult<T> {
    serde_json::from_str(raw).map_err(|e| corrupt_row(table, format!("bad json: {e}")))
}
