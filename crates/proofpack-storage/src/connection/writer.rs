//! Write transaction helper: BEGIN IMMEDIATE, commit on success, roll back
//! on any error.

use proofpack_core::errors::ProofpackResult;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::to_storage_err;

/// Execute `f` inside a BEGIN IMMEDIATE transaction. The write lock is taken
/// at transaction start, so a batch never fails halfway on SQLITE_BUSY.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> ProofpackResult<T>
where
    F: FnOnce(&Transaction<'_>) -> ProofpackResult<T>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| to_storage_err(format!("failed to begin immediate transaction: {e}")))?;

    match f(&tx) {
        Ok(result) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("failed to commit: {e}")))?;
            Ok(result)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}
