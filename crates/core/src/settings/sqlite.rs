//! SQLite-backed settings store.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::{SettingsError, SettingsStore};

/// SQLite-backed key-value settings store.
pub struct SqliteSettingsStore {
    conn: Mutex<Connection>,
}

impl SqliteSettingsStore {
    /// Open a settings database, creating the file and table if needed.
    pub fn new(path: &Path) -> Result<Self, SettingsError> {
        let conn = Connection::open(path).map_err(|e| SettingsError::Storage(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory settings store (useful for testing).
    pub fn in_memory() -> Result<Self, SettingsError> {
        let conn =
            Connection::open_in_memory().map_err(|e| SettingsError::Storage(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), SettingsError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| SettingsError::Storage(e.to_string()))?;

        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, SettingsError> {
        self.conn
            .lock()
            .map_err(|e| SettingsError::Storage(format!("lock poisoned: {}", e)))
    }
}

impl SettingsStore for SqliteSettingsStore {
    fn load(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT value FROM settings WHERE key = ?",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| SettingsError::Storage(e.to_string()))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )
        .map_err(|e| SettingsError::Storage(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM settings WHERE key = ?", params![key])
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        Ok(())
    }
}
