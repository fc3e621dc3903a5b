//! SQLite-backed store for observed exchange rates.
//!
//! The store owns one long-lived connection for the whole process, opened at
//! startup and dropped at shutdown. Requests never open their own connection;
//! they borrow this one under a mutex, and SQLite's own locking governs
//! serialization against any other writer of the same file. Persistence
//! failures are reported to the caller, who decides whether to surface them.

use std::path::Path;
use std::sync::Mutex;

use chrono::NaiveDateTime;
use log::debug;
use rusqlite::{Connection, params};

use rate_common::{RateError, Result};

/// Format of the `timestamp` column as written by SQLite's CURRENT_TIMESTAMP.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One persisted rate observation, as read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    /// Auto-incrementing row id.
    pub id: i64,
    /// Bid value exactly as returned by the upstream API.
    pub bid: String,
    /// Insertion time, defaulted by the storage engine (UTC).
    pub timestamp: NaiveDateTime,
}

/// Handle to the `exchange_rates` table.
pub struct RateStore {
    conn: Mutex<Connection>,
}

impl RateStore {
    /// Open the store at `path` and make sure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the `exchange_rates` table if it is absent. Safe to call any
    /// number of times; a pre-existing table is a no-op, never an error.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.conn.lock()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS exchange_rates (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                bid TEXT,
                timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
        )?;
        Ok(())
    }

    /// Insert one bid observation. The timestamp is left to the storage
    /// default.
    pub fn insert_bid(&self, bid: &str) -> Result<()> {
        let conn = self.conn.lock()?;
        let mut stmt = conn.prepare_cached("INSERT INTO exchange_rates (bid) VALUES (?1)")?;
        stmt.execute(params![bid])?;
        debug!("persisted bid {}", bid);
        Ok(())
    }

    /// Return up to `limit` most recently inserted records, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<RateRecord>> {
        let conn = self.conn.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, bid, timestamp FROM exchange_rates ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, bid, raw_ts) = row?;
            let timestamp = NaiveDateTime::parse_from_str(&raw_ts, TIMESTAMP_FORMAT)
                .map_err(|e| RateError::Format(format!("bad timestamp in row {}: {}", id, e)))?;
            records.push(RateRecord { id, bid, timestamp });
        }
        Ok(records)
    }

    /// Flip the connection into reject-all-writes mode so tests can observe
    /// the swallow-persistence-failures path.
    #[cfg(test)]
    pub(crate) fn make_read_only(&self) {
        let conn = self.conn.lock().unwrap();
        conn.pragma_update(None, "query_only", true).unwrap();
    }

    /// Hold the connection mutex for `dur` so tests can stall other callers.
    #[cfg(test)]
    pub(crate) fn hold_lock_for(&self, dur: std::time::Duration) {
        let _conn = self.conn.lock().unwrap();
        std::thread::sleep(dur);
    }
}
