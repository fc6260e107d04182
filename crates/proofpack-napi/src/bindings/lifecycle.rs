//! Lifecycle bindings: initialize, shutdown, config inspection.

use napi_derive::napi;
use std::path::PathBuf;

use crate::conversions::{error_types, to_json};
use crate::runtime::{self, RuntimeOptions};

/// Initialize the Proofpack runtime.
///
/// Must be called before any workflow or settlement function.
/// `db_path`: optional path to SQLite database (null for in-memory).
/// `config_toml`: optional TOML configuration string.
#[napi]
pub fn proofpack_initialize(db_path: Option<String>, config_toml: Option<String>) -> napi::Result<()> {
    runtime::initialize(RuntimeOptions {
        db_path: db_path.map(PathBuf::from),
        config_toml,
    })
}

#[napi]
pub fn proofpack_is_initialized() -> bool {
    runtime::is_initialized()
}

/// Flush the WAL so everything written is in the main database file.
#[napi]
pub fn proofpack_shutdown() -> napi::Result<()> {
    let rt = runtime::get()?;
    rt.storage.checkpoint().map_err(error_types::to_napi_error)?;
    tracing::info!("proofpack runtime checkpointed for shutdown");
    Ok(())
}

/// The active configuration as JSON.
#[napi]
pub fn proofpack_get_config() -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;
    to_json(&rt.config, "config")
}
