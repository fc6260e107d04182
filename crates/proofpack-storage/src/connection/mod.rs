//! Connection management: one serialized connection for reads and writes.

pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use proofpack_core::errors::ProofpackResult;
use rusqlite::Connection;

use self::pragmas::apply_pragmas;
use crate::migrations;
use crate::to_storage_err;

/// Owns the database connection. Every operation takes the lock, so calls
/// from different threads are serialized.
pub struct DatabaseManager {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a database at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> ProofpackResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| to_storage_err(format!("open {}: {e}", path.display())))?;
        Self::initialize(conn, busy_timeout_ms, Some(path.to_path_buf()))
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> ProofpackResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(
            conn,
            proofpack_core::config::defaults::DEFAULT_BUSY_TIMEOUT_MS,
            None,
        )
    }

    fn initialize(
        conn: Connection,
        busy_timeout_ms: u32,
        path: Option<PathBuf>,
    ) -> ProofpackResult<Self> {
        apply_pragmas(&conn, busy_timeout_ms)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_conn<F, T>(&self, f: F) -> ProofpackResult<T>
    where
        F: FnOnce(&Connection) -> ProofpackResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection lock poisoned"))?;
        f(&guard)
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
