//! SQLite-backed state store.

use rusqlite::{Connection, OptionalExtension, params};
use tracing::warn;

use crate::errors::AppResult;
use crate::store::StateStore;
use crate::utils::path::expand_tilde;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (and create if needed) the state database at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(expand_tilde(path))?;
        ensure_state_table(&conn)?;
        Ok(Self { conn })
    }
}

fn ensure_state_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS state (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )
}

impl StateStore for SqliteStore {
    fn get(&self, key: &str) -> Option<String> {
        let row = self
            .conn
            .query_row("SELECT value FROM state WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional();
        match row {
            Ok(value) => value,
            Err(err) => {
                warn!("state read for '{key}' failed: {err}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let res = self.conn.execute(
            "INSERT INTO state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        );
        if let Err(err) = res {
            warn!("state write for '{key}' failed: {err}");
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = self
            .conn
            .execute("DELETE FROM state WHERE key = ?1", [key])
        {
            warn!("state delete for '{key}' failed: {err}");
        }
    }
}
