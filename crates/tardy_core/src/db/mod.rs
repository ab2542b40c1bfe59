//! SQLite file behind the key-value namespace.
//!
//! # Responsibility
//! - Open store files with the `kv_entries` schema applied.
//! - Report which snapshot keys a file holds, for diagnostics.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`; newer files are refused.
//! - Snapshot values are never parsed at this layer.

use crate::storage::{StorageResult, RECORDS_KEY, STUDENTS_KEY};
use rusqlite::Connection;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// One row of `kv_entries`, without its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredKey {
    pub key: String,
    /// Size of the stored value in bytes.
    pub value_bytes: usize,
    /// Epoch milliseconds of the last write.
    pub updated_at: i64,
    /// Whether the key is one of the two snapshot keys this crate owns.
    pub known: bool,
}

/// Lists every key in the store file, ordered by key.
pub fn stored_keys(conn: &Connection) -> StorageResult<Vec<StoredKey>> {
    let mut stmt = conn.prepare(
        "SELECT key, length(CAST(value AS BLOB)), updated_at
         FROM kv_entries
         ORDER BY key ASC;",
    )?;
    let rows = stmt.query_map([], |row| {
        let key: String = row.get(0)?;
        let value_bytes: i64 = row.get(1)?;
        Ok(StoredKey {
            known: key == RECORDS_KEY || key == STUDENTS_KEY,
            key,
            value_bytes: usize::try_from(value_bytes).unwrap_or_default(),
            updated_at: row.get(2)?,
        })
    })?;

    let mut keys = Vec::new();
    for row in rows {
        keys.push(row?);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::{open_db_in_memory, stored_keys};
    use crate::storage::{KeyValueStore, SqliteKeyValueStore, RECORDS_KEY};

    #[test]
    fn stored_keys_flags_foreign_keys_and_counts_utf8_bytes() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::new(&conn);
        store.set_item(RECORDS_KEY, "[]").unwrap();
        store.set_item("theme", "gelap é").unwrap();

        let keys = stored_keys(&conn).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].key, "tardyRecords");
        assert!(keys[0].known);
        assert_eq!(keys[0].value_bytes, 2);
        assert_eq!(keys[1].key, "theme");
        assert!(!keys[1].known);
        assert_eq!(keys[1].value_bytes, 8);
        assert!(keys[1].updated_at > 0);
    }
}
