//! SQLite connection handling.
//!
//! One write connection serialized behind a mutex, plus a small set of
//! read-only connections handed out round-robin. Multi-statement writes go
//! through `immediate_transaction`, which holds the write lock for the
//! whole transaction.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags, Transaction, TransactionBehavior};
use stride_core::errors::StorageError;

use crate::migrations;

/// Read connections opened per database file when the caller does not
/// pass an explicit count.
const DEFAULT_READERS: usize = 4;

/// Owns every connection to one stride database.
///
/// In-memory databases get no read connections (each would be a different
/// database); their reads fall through to the writer.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open the database at `path`, configure it, and run any pending
    /// migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Self::open_with_readers(path, DEFAULT_READERS)
    }

    /// Open with an explicit reader count (`storage.read_pool_size`).
    pub fn open_with_readers(path: &Path, readers: usize) -> Result<Self, StorageError> {
        let writer = open_writer(path)?;
        let readers = (0..readers.max(1))
            .map(|_| open_reader(path).map(Mutex::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            cursor: AtomicUsize::new(0),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer =
            Connection::open_in_memory().map_err(|e| StorageError::SqliteError {
                message: format!("open in-memory database: {e}"),
            })?;
        configure_writer(&writer)?;
        migrations::run_migrations(&writer)?;
        Ok(Self {
            writer: Mutex::new(writer),
            readers: Vec::new(),
            cursor: AtomicUsize::new(0),
            path: None,
        })
    }

    /// Run `f` on the writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.writer.lock().map_err(|_| lock_poisoned())?;
        f(&guard)
    }

    /// Run `f` on a read-only connection, round-robin across the set.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        if self.readers.is_empty() {
            return self.with_writer(f);
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let guard = self.readers[idx].lock().map_err(|_| lock_poisoned())?;
        f(&guard)
    }

    /// Run `f` inside a BEGIN IMMEDIATE transaction on the writer.
    ///
    /// The SQLite write lock is taken at transaction start, so a commit
    /// never fails with SQLITE_BUSY. An error from `f` rolls everything
    /// back when the transaction drops.
    pub fn immediate_transaction<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
    {
        let mut guard = self.writer.lock().map_err(|_| lock_poisoned())?;
        let tx = guard
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| StorageError::SqliteError {
                message: format!("begin immediate transaction: {e}"),
            })?;
        let result = f(&tx)?;
        tx.commit().map_err(|e| StorageError::SqliteError {
            message: format!("commit transaction: {e}"),
        })?;
        Ok(result)
    }

    /// Truncate the WAL after a large batch of writes.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_writer(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);").map_err(|e| {
                StorageError::SqliteError {
                    message: format!("wal checkpoint: {e}"),
                }
            })
        })
    }

    /// Whether the writer is in WAL mode. In-memory databases report
    /// `memory` and return false.
    pub fn verify_wal_mode(&self) -> Result<bool, StorageError> {
        self.with_writer(|conn| {
            conn.pragma_query_value(None, "journal_mode", |row| row.get::<_, String>(0))
                .map(|mode| mode.eq_ignore_ascii_case("wal"))
                .map_err(|e| StorageError::SqliteError {
                    message: format!("read journal_mode: {e}"),
                })
        })
    }

    /// Database file path, `None` for in-memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn open_writer(path: &Path) -> Result<Connection, StorageError> {
    let conn = Connection::open(path).map_err(|e| StorageError::SqliteError {
        message: format!("open {}: {e}", path.display()),
    })?;
    configure_writer(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

fn open_reader(path: &Path) -> Result<Connection, StorageError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| StorageError::SqliteError {
            message: format!("open reader for {}: {e}", path.display()),
        })?;
    configure_reader(&conn)?;
    Ok(conn)
}

/// Journaling, durability, and locking settings for the writer.
fn configure_writer(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(|e| StorageError::SqliteError {
        message: format!("configure writer connection: {e}"),
    })
}

/// Readers are pinned read-only and share the writer's busy timeout.
fn configure_reader(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA query_only = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(|e| StorageError::SqliteError {
        message: format!("configure reader connection: {e}"),
    })
}

fn lock_poisoned() -> StorageError {
    StorageError::SqliteError {
        message: "connection lock poisoned".to_string(),
    }
}
