//! RFC 3339 timestamp parsing for arguments that arrive as strings.

use chrono::{DateTime, Utc};

use super::error_types;

/// Parse an RFC 3339 timestamp, normalized to UTC.
pub fn parse_timestamp(value: &str, field: &str) -> napi::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| error_types::invalid_argument(format!("Invalid {field} '{value}': {e}")))
}

/// `now` override used by the scoring bindings; the current time when absent.
pub fn now_or(value: Option<String>) -> napi::Result<DateTime<Utc>> {
    match value {
        Some(v) => parse_timestamp(&v, "now"),
        None => Ok(Utc::now()),
    }
}
