//! SQLite implementation of `KeyValueStore`.

use super::{KeyValueStore, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Namespaced key-value rows over a migrated connection.
pub struct SqliteKvStore {
    conn: Connection,
    namespace: String,
}

impl SqliteKvStore {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: Connection, namespace: impl Into<String>) -> Self {
        Self {
            conn,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Lists keys stored under this namespace, sorted.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries WHERE namespace = ?1 ORDER BY key ASC;")?;
        let keys = stmt
            .query_map(params![self.namespace], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl KeyValueStore for SqliteKvStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE namespace = ?1 AND key = ?2;",
                params![self.namespace, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (namespace, key, value)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (namespace, key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.namespace, key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.conn.execute(
            "DELETE FROM kv_entries WHERE namespace = ?1 AND key = ?2;",
            params![self.namespace, key],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKvStore;
    use crate::db::open_db_in_memory;
    use crate::store::KeyValueStore;

    #[test]
    fn write_overwrites_and_namespaces_isolate() {
        let mut store = SqliteKvStore::new(open_db_in_memory().unwrap(), "alpha");
        store.write("tasks", "[]").unwrap();
        store.write("tasks", "[1]").unwrap();
        assert_eq!(store.read("tasks").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.keys().unwrap(), vec!["tasks".to_string()]);

        store.remove("tasks").unwrap();
        assert!(store.read("tasks").unwrap().is_none());
    }
}
