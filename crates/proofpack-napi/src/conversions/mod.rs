//! Rust ↔ JS type conversions. Values cross the boundary as
//! `serde_json::Value`; money and timestamps travel as strings.

pub mod error_types;
pub mod pack_types;
pub mod settlement_types;
pub mod time_types;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub(crate) fn from_json<T: DeserializeOwned>(value: serde_json::Value, what: &str) -> napi::Result<T> {
    serde_json::from_value(value).map_err(|e| error_types::invalid_argument(format!("Invalid {what}: {e}")))
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> napi::Result<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| error_types::internal_error(format!("Failed to serialize {what}: {e}")))
}
