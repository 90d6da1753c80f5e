//! Repository pattern for database access.

use crate::db::error::DbError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use vocab_core::{DurableStore, SessionSettings};

type Result<T> = std::result::Result<T, DbError>;

/// Repository for settings operations.
pub trait SettingsRepository {
    /// Stored settings, or the defaults when none were saved yet.
    fn get_settings(&self) -> Result<SessionSettings>;
    fn save_settings(&self, settings: &SessionSettings) -> Result<()>;
}

/// SQLite-backed repository.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        Ok(())
    }

    fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", params![key], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn clear_values(&self) -> Result<()> {
        self.conn.execute("DELETE FROM kv_store", [])?;
        Ok(())
    }
}

impl DurableStore for SqliteRepository {
    fn get(&self, key: &str) -> vocab_core::Result<Option<String>> {
        self.get_value(key).map_err(Into::into)
    }

    fn set(&mut self, key: &str, value: &str) -> vocab_core::Result<()> {
        self.set_value(key, value).map_err(Into::into)
    }

    fn clear(&mut self) -> vocab_core::Result<()> {
        self.clear_values().map_err(Into::into)
    }
}

impl SettingsRepository for SqliteRepository {
    fn get_settings(&self) -> Result<SessionSettings> {
        let data: Option<String> = self
            .conn
            .query_row("SELECT data FROM settings WHERE id = 1", [], |row| row.get(0))
            .optional()?;

        match data {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(SessionSettings::default()),
        }
    }

    fn save_settings(&self, settings: &SessionSettings) -> Result<()> {
        let data = serde_json::to_string(settings)?;
        self.conn.execute(
            "INSERT INTO settings (id, data, updated_at) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
            params![data, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
