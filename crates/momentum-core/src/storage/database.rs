//! SQLite-backed persistence.
//!
//! Provides:
//! - Key-value store holding the momentum state blob
//! - Momentum change history

use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::{DatabaseError, Result};
use crate::momentum::{MomentumEvent, MomentumState};

use super::data_dir;
use super::store::{MomentumStore, MOMENTUM_STATE_KEY};

/// SQLite database for engine state and history.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data dir>/momentum.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("momentum.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS momentum_events (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    kind        TEXT NOT NULL,
                    event_date  TEXT NOT NULL,
                    payload     TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_momentum_events_date
                    ON momentum_events(event_date);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Append one history entry.
    pub fn record_event(&self, event: &MomentumEvent) -> Result<i64> {
        let payload = serde_json::to_string(event)?;
        self.conn.execute(
            "INSERT INTO momentum_events (kind, event_date, payload) VALUES (?1, ?2, ?3)",
            params![event.kind(), event.date().to_string(), payload],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent history entries, newest first.
    pub fn events(&self, limit: usize) -> Result<Vec<MomentumEvent>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM momentum_events ORDER BY id DESC LIMIT ?1")?;
        let rows = stmt.query_map(params![limit as i64], |row| row.get::<_, String>(0))?;

        let mut events = Vec::new();
        for row in rows {
            events.push(serde_json::from_str(&row?)?);
        }
        Ok(events)
    }
}

impl MomentumStore for Database {
    fn load(&self) -> Result<Option<MomentumState>> {
        match self.kv_get(MOMENTUM_STATE_KEY)? {
            Some(blob) => {
                let state = serde_json::from_str(&blob).map_err(|e| DatabaseError::CorruptValue {
                    key: MOMENTUM_STATE_KEY.to_string(),
                    message: e.to_string(),
                })?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    fn save(&self, state: &MomentumState) -> Result<()> {
        let blob = serde_json::to_string(state)?;
        self.kv_set(MOMENTUM_STATE_KEY, &blob)
    }

    fn append_event(&self, event: &MomentumEvent) -> Result<()> {
        self.record_event(event).map(|_| ())
    }

    fn recent_events(&self, limit: usize) -> Result<Vec<MomentumEvent>> {
        self.events(limit)
    }
}
