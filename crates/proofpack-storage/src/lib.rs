//! # proofpack-storage
//!
//! SQLite persistence behind the store traits in `proofpack-core`: packs,
//! attribution events, settlements, and the append-only audit log.
//!
//! One mutex-guarded connection serves every read and write. The settlement
//! commit is the only multi-row write and runs in a single transaction.

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use engine::StorageEngine;

use proofpack_core::errors::{ProofpackError, StorageError};

/// Helper to convert a message into a `ProofpackError::StorageError`.
pub(crate) fn to_storage_err(msg: impl Into<String>) -> ProofpackError {
    ProofpackError::StorageError(StorageError::SqliteError {
        message: msg.into(),
    })
}

pub(crate) fn corrupt_row(table: &str, details: impl Into<String>) -> ProofpackError {
    ProofpackError::StorageError(StorageError::CorruptRow {
        table: table.to_string(),
        details: details.into(),
    })
}
