use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database operation failed: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// String-keyed store of serialized text values, backed by SQLite
///
/// SQLite was chosen because:
/// - Zero-config embedded database
/// - Single file in the user data directory
/// - Battle-tested and reliable
/// - Doesn't require a separate process
///
/// Values are JSON text, typed at the boundary: callers hand over serde
/// types and get serde types back. Every save overwrites the whole value
/// for its key (last-writer-wins, no merge).
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the store at the given path
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory store for tests and throwaway sessions
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Load the value stored under `key`, falling back on any failure
    ///
    /// Missing key, malformed stored text, and storage errors all collapse
    /// into `fallback` - this mirrors the contract of a browser's local
    /// storage read and keeps callers free of error plumbing. Failures are
    /// still logged so corrupt data doesn't vanish silently.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!("Falling back to default for key '{}': {}", key, e);
                fallback
            }
        }
    }

    /// Explicit-contract variant of `load`: surfaces missing vs. broken
    ///
    /// `Ok(None)` means the key simply isn't there; `Err` means the stored
    /// text exists but doesn't parse, or the database itself failed.
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let text: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        match text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` and overwrite whatever is stored under `key`
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, text, unix_now()],
        )?;
        Ok(())
    }

    /// Remove `key`; a later `load` returns the fallback again
    pub fn delete(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Whether any value is stored under `key`
    pub fn contains(&self, key: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM kv WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;

    #[test]
    fn test_load_missing_key_returns_fallback() {
        let store = Store::open_in_memory().unwrap();
        let value: Vec<String> = store.load("nope", vec!["fallback".to_string()]);
        assert_eq!(value, vec!["fallback".to_string()]);

        // Repeatable: still the fallback on a second read
        let again: Vec<String> = store.load("nope", Vec::new());
        assert!(again.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let store = Store::open_in_memory().unwrap();
        let list = vec![(1, "one".to_string()), (2, "two".to_string())];

        store.save("pairs", &list).unwrap();
        let loaded: Vec<(i32, String)> = store.load("pairs", Vec::new());
        assert_eq!(loaded, list);
    }

    #[test]
    fn test_save_overwrites_unconditionally() {
        let store = Store::open_in_memory().unwrap();
        store.save("k", &vec![1, 2, 3]).unwrap();
        store.save("k", &vec![9]).unwrap();

        let loaded: Vec<i32> = store.load("k", Vec::new());
        assert_eq!(loaded, vec![9]);
    }

    #[test]
    fn test_delete_restores_fallback() {
        let store = Store::open_in_memory().unwrap();
        store.save("k", &"hello".to_string()).unwrap();
        store.delete("k").unwrap();

        let loaded: String = store.load("k", "default".to_string());
        assert_eq!(loaded, "default");
        assert!(!store.contains("k").unwrap());
    }

    #[test]
    fn test_corrupt_value_falls_back() {
        let store = Store::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, 0)",
                params!["bad", "{not json"],
            )
            .unwrap();

        let loaded: Vec<i32> = store.load("bad", vec![7]);
        assert_eq!(loaded, vec![7]);

        // The explicit contract surfaces the parse failure instead
        let result: Result<Option<Vec<i32>>> = store.try_load("bad");
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        {
            let store = Store::open(&path).unwrap();
            store.save("k", &vec!["a", "b"]).unwrap();
        }

        let store = Store::open(&path).unwrap();
        let loaded: Vec<String> = store.load("k", Vec::new());
        assert_eq!(loaded, vec!["a".to_string(), "b".to_string()]);
    }
}
