//! Schema steps for the `kv_entries` table.
//!
//! Step `n` in `SCHEMA_STEPS` produces schema version `n + 1`. Steps run in
//! one transaction, so a failed upgrade leaves the file at its old version.

use crate::storage::{StorageError, StorageResult};
use log::info;
use rusqlite::Connection;

const SCHEMA_STEPS: &[&str] = &[include_str!("0001_kv_entries.sql")];

/// Newest schema version this build can write.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.len() as u32
}

/// Schema version recorded in the file (0 for a fresh or unversioned file).
pub fn schema_version(conn: &Connection) -> StorageResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Brings the file up to `latest_version()`.
///
/// # Errors
/// - `StorageError::SchemaTooNew` when a newer build wrote the file; the
///   snapshots in it are left untouched.
/// - `StorageError::Sqlite` when a step fails.
pub fn apply_migrations(conn: &mut Connection) -> StorageResult<()> {
    let from_version = schema_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(StorageError::SchemaTooNew {
            db_version: from_version,
            latest_supported: latest,
        });
    }
    if from_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in (1u32..)
        .zip(SCHEMA_STEPS.iter())
        .skip(from_version as usize)
    {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        from_version, latest
    );
    Ok(())
}
