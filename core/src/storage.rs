//! Pluggable key/value persistence for demo-mode state.
//!
//! RULE: Only storage.rs talks to the database. The manager calls the
//! Storage trait — it never executes SQL directly. Backends are
//! swappable: SQLite for durable production state, an in-memory map for
//! tests.

use crate::error::DemoResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

pub trait Storage: Send {
    fn get(&self, key: &str) -> DemoResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> DemoResult<()>;
    fn remove(&mut self, key: &str) -> DemoResult<()>;
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> DemoResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> DemoResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DemoResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Durable backend: one key/value table in SQLite.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the state database at `path`.
    pub fn open(path: &str) -> DemoResult<Self> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.migrate()?;
        Ok(storage)
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> DemoResult<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.migrate()?;
        Ok(storage)
    }

    fn migrate(&self) -> DemoResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> DemoResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> DemoResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DemoResult<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(storage: &mut dyn Storage) {
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v1").unwrap();
        assert_eq!(storage.get("k").unwrap(), Some("v1".to_string()));
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap(), Some("v2".to_string()));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn memory_storage_roundtrips() {
        roundtrip(&mut MemoryStorage::new());
    }

    #[test]
    fn sqlite_storage_roundtrips() {
        roundtrip(&mut SqliteStorage::in_memory().unwrap());
    }

    #[test]
    fn remove_of_missing_key_is_a_no_op() {
        let mut storage = SqliteStorage::in_memory().unwrap();
        storage.remove("never-set").unwrap();
    }
}
