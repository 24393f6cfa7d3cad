//! SQLite-backed key-value state store.
//!
//! The CLI keeps the serialized timer engine here between invocations, so
//! a countdown survives separate `timer` commands.

use rusqlite::{params, Connection};
use std::path::Path;

use super::data_dir;
use crate::error::StorageError;

pub struct StateDb {
    conn: Connection,
}

impl StateDb {
    /// Open the store at `~/.config/focusloop/focusloop.db`.
    ///
    /// Creates the file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("focusloop.db");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_owned(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a value from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store_roundtrip() {
        let db = StateDb::open_memory().unwrap();
        assert!(db.kv_get("engine").unwrap().is_none());
        db.kv_set("engine", "{}").unwrap();
        assert_eq!(db.kv_get("engine").unwrap().unwrap(), "{}");
        db.kv_set("engine", "{\"a\":1}").unwrap();
        assert_eq!(db.kv_get("engine").unwrap().unwrap(), "{\"a\":1}");
        db.kv_delete("engine").unwrap();
        assert!(db.kv_get("engine").unwrap().is_none());
    }

    #[test]
    fn open_at_creates_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db");
        {
            let db = StateDb::open_at(&path).unwrap();
            db.kv_set("k", "v").unwrap();
        }
        let db = StateDb::open_at(&path).unwrap();
        assert_eq!(db.kv_get("k").unwrap().unwrap(), "v");
    }
}
