//! Eventdash Store - SQLite-backed persistence
//!
//! Owns the three server-side record types:
//! - events (the dashboard's CRUD records)
//! - members (the team roster, read-only from the API)
//! - sessions (bearer tokens issued at login)
//!
//! A single connection is shared behind an async mutex. All queries are short
//! and indexed, so handlers hold the lock only for the duration of one
//! statement or transaction.

pub mod error;
pub mod events;
pub mod members;
pub mod sessions;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use types::{parse_event_date, Event, Member, NewEvent, Session};

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS events (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        date_ms INTEGER NOT NULL,
        image_url TEXT NOT NULL DEFAULT '',
        created_by TEXT,
        created_at_ms INTEGER NOT NULL,
        updated_at_ms INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_events_date ON events(date_ms, created_at_ms);

    CREATE TABLE IF NOT EXISTS members (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        role TEXT NOT NULL,
        joined_at_ms INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS sessions (
        token TEXT PRIMARY KEY,
        email TEXT NOT NULL,
        expires_at_ms INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_sessions_expiry ON sessions(expires_at_ms);
";

/// SQLite-backed store for events, members and sessions
pub struct Store {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Store {
    /// Create or open the store in `data_dir`
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(data_dir)?;
        let path = data_dir.join("eventdash.db");

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            ",
        )?;

        Self::init(conn, Some(path))
    }

    /// Open a throwaway in-memory store
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;

        tracing::debug!(path = ?path, "Store initialized");

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Path of the database file (None for in-memory stores)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a trivial query to verify the connection is usable
    pub async fn ping(&self) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_creates_database_file() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        assert!(store.path().unwrap().exists());
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let dir = tempdir().unwrap();

        {
            let store = Store::open(dir.path()).unwrap();
            store
                .add_member("Ada", "ada@example.com", "owner")
                .await
                .unwrap();
        }

        let store = Store::open(dir.path()).unwrap();
        let members = store.list_members().await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.path().is_none());
        store.ping().await.unwrap();
    }
}
