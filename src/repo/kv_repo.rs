//! Key/value slot repository contracts and implementations.
//!
//! # Responsibility
//! - Provide whole-blob read/write over named persistence slots.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `write` is an upsert: it creates the slot or replaces its blob.
//! - `read` returns `None` for a slot that has never been written; the
//!   service layer interprets that as "seed defaults".

use crate::db::DbResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Slot-oriented persistence backend used by every store.
///
/// Implementations are single-writer and synchronous; a call observes all
/// previously completed writes made through the same instance.
pub trait KvRepository {
    /// Returns the blob stored under `key`, or `None` if never written.
    fn read(&self, key: &str) -> DbResult<Option<String>>;
    /// Creates or replaces the blob stored under `key`.
    fn write(&self, key: &str, value: &str) -> DbResult<()>;
}

/// SQLite-backed slot repository over a migrated connection.
pub struct SqliteKvRepository {
    conn: Connection,
}

impl SqliteKvRepository {
    /// Wraps a connection produced by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Releases the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl KvRepository for SqliteKvRepository {
    fn read(&self, key: &str) -> DbResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory slot repository for tests and ephemeral registries.
///
/// Interior mutability keeps the trait's `&self` write signature; this
/// backend never fails.
#[derive(Debug, Default)]
pub struct MemoryKvRepository {
    slots: RefCell<BTreeMap<String, String>>,
}

impl MemoryKvRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of slots ever written. Test convenience.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl KvRepository for MemoryKvRepository {
    fn read(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> DbResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
