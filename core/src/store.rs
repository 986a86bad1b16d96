//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database. The app saves and loads one
//! JSON blob under STATE_KEY and never runs SQL itself.

use crate::{
    error::PartyResult,
    snapshot::{SavedState, STATE_KEY},
};
use rusqlite::{params, Connection, OptionalExtension};

pub struct AppStore {
    conn: Connection,
}

impl AppStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> PartyResult<Self> {
        let conn = Connection::open(path)?;
        // WAL only matters for real files; in-memory databases ignore it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PartyResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PartyResult<()> {
        self.conn.execute_batch(include_str!("../migrations/001_app_state.sql"))?;
        Ok(())
    }

    // ── Raw key/value ──────────────────────────────────────────

    pub fn get(&self, key: &str) -> PartyResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn put(&self, key: &str, value: &str) -> PartyResult<()> {
        self.conn.execute(
            "INSERT INTO app_state (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                            updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Remove every key.
    pub fn clear(&self) -> PartyResult<()> {
        self.conn.execute("DELETE FROM app_state", [])?;
        log::info!("store cleared");
        Ok(())
    }

    // ── App state blob ─────────────────────────────────────────

    pub fn load_state(&self) -> PartyResult<Option<SavedState>> {
        match self.get(STATE_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn save_state(&self, state: &SavedState) -> PartyResult<()> {
        let json = serde_json::to_string(state)?;
        self.put(STATE_KEY, &json)
    }
}
