// Local key-value storage backed by SQLite.
//
// The on-disk analog of browser local storage: string keys, string values,
// one row per key. Writers always replace the whole value.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// Tracked in SQLite's `user_version` pragma.
const SCHEMA_VERSION: i64 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS local_storage (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
"#;

#[derive(Debug)]
pub struct LocalStorage {
    conn: Connection,
}

impl LocalStorage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create local storage directory `{}`", parent.display())
            })?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("failed to open local storage at `{}`", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")
            .context("failed to configure sqlite pragmas for local storage")?;

        Self::from_connection(conn)
    }

    /// Non-persistent storage, for tests and throwaway sessions.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory storage")?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        let version: i64 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .context("failed to read local storage schema version")?;
        if version < SCHEMA_VERSION {
            let tx = conn.transaction().context("failed to start schema transaction")?;
            tx.execute_batch(SCHEMA_SQL).context("failed to create local storage schema")?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)
                .context("failed to record local storage schema version")?;
            tx.commit().context("failed to commit local storage schema")?;
        }
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM local_storage WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .with_context(|| format!("failed to read local storage key `{key}`"))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO local_storage (key, value, updated_at) \
                 VALUES (?1, ?2, datetime('now')) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, \
                                                updated_at = excluded.updated_at",
                params![key, value],
            )
            .with_context(|| format!("failed to write local storage key `{key}`"))?;
        Ok(())
    }
}
