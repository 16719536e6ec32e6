//! SQLite store
//!
//! Wraps a single `rusqlite::Connection` behind a mutex; all repositories
//! and services receive a clone of the store instead of reaching for a
//! global. The lock serializes statements, which also makes the rate-limit
//! read-then-increment exact in-process (see the rate limit service).

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::error::{DbError, DbResult};
use crate::schema::INTAKE_SCHEMA;

/// Shared SQLite store handle.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an in-memory database (tests).
    pub fn open_in_memory() -> DbResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> DbResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create all tables and indexes if they do not exist.
    pub fn init_schema(&self) -> DbResult<()> {
        self.with_conn(|conn| conn.execute_batch(INTAKE_SCHEMA))
    }

    /// Run a closure against the locked connection.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    ) -> DbResult<T> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn).map_err(DbError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_initializes_idempotently() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.init_schema().unwrap();
        store.init_schema().unwrap();

        let count: i64 = store
            .with_conn(|conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'casefiles'",
                    [],
                    |row| row.get(0),
                )
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_foreign_keys_are_enforced() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.init_schema().unwrap();

        let result = store.with_conn(|conn| {
            conn.execute(
                "INSERT INTO clients (casefile_id, client_number, first_name, last_name, date_of_birth, created_at)
                 VALUES (9999, 1, 'Jane', 'Doe', '1990-01-01', '2026-01-01T00:00:00Z')",
                [],
            )
        });
        assert!(result.is_err());
    }
}
