use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::MovielandError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);";

/// Storage key for the serialized watchlist.
pub const WATCHLIST_KEY: &str = "watchlist";
/// Storage key for the theme preference (`"dark"` / `"light"`).
pub const THEME_KEY: &str = "theme";

/// Durable string key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, MovielandError>;
    fn set(&self, key: &str, value: &str) -> Result<(), MovielandError>;
    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), MovielandError>;
}

/// Shared handle used by the stores that persist through a [`KeyValueStore`].
pub type SharedStore = Arc<dyn KeyValueStore>;

/// SQLite-backed key-value storage.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> Result<Self, MovielandError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path = %path.display(), "opened key-value store");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, MovielandError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic while holding the lock cannot leave a half-written row.
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, MovielandError> {
        self.conn()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MovielandError> {
        self.conn().execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), MovielandError> {
        self.conn()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-process key-value storage.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, MovielandError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MovielandError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), MovielandError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Remove every key the app persists.
pub fn reset(store: &dyn KeyValueStore) -> Result<(), MovielandError> {
    store.remove(WATCHLIST_KEY)?;
    store.remove(THEME_KEY)?;
    tracing::info!("cleared persisted watchlist and theme");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("theme").unwrap(), None);

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));

        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);

        // Removing twice is fine.
        store.remove("theme").unwrap();
    }

    #[test]
    fn test_sqlite_store_basic() {
        let store = SqliteStore::open_memory().unwrap();
        exercise(&store);
    }

    #[test]
    fn test_memory_store_basic() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_sqlite_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movieland.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set(WATCHLIST_KEY, "[]").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get(WATCHLIST_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_reset_removes_both_keys() {
        let store = MemoryStore::new();
        store.set(WATCHLIST_KEY, "[]").unwrap();
        store.set(THEME_KEY, "dark").unwrap();
        store.set("other", "kept").unwrap();

        reset(&store).unwrap();

        assert_eq!(store.get(WATCHLIST_KEY).unwrap(), None);
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
        assert_eq!(store.get("other").unwrap().as_deref(), Some("kept"));
    }
}
