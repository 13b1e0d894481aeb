//! Key/value store contract and SQLite implementation.

use crate::store::StoreResult;
use rusqlite::{params, Connection, OptionalExtension};

/// String blobs under string keys, with local-storage semantics.
pub trait StateStore {
    fn get_value(&self, key: &str) -> StoreResult<Option<String>>;
    /// Inserts or replaces the value under `key`.
    fn set_value(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Returns whether a value was present.
    fn remove_value(&self, key: &str) -> StoreResult<bool>;
}

/// SQLite-backed store over the `kv_entries` table.
pub struct SqliteStateStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StateStore for SqliteStateStore<'_> {
    fn get_value(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_value(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_value(&self, key: &str) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::{SqliteStateStore, StateStore};
    use crate::db::open_db_in_memory;

    #[test]
    fn set_get_overwrite_and_remove() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteStateStore::new(&conn);

        assert_eq!(store.get_value("k").unwrap(), None);
        store.set_value("k", "one").unwrap();
        store.set_value("k", "two").unwrap();
        assert_eq!(store.get_value("k").unwrap().as_deref(), Some("two"));

        assert!(store.remove_value("k").unwrap());
        assert!(!store.remove_value("k").unwrap());
        assert_eq!(store.get_value("k").unwrap(), None);
    }
}
