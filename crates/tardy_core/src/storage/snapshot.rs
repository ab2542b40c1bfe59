//! Whole-store JSON snapshots under fixed keys.
//!
//! `read_snapshot`/`write_snapshot` expose typed errors for tests;
//! `load_or_default`/`persist` are the non-failing entry points stores use.

use super::kv::{KeyValueStore, StorageError};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key holding the serialized record list.
pub const RECORDS_KEY: &str = "tardyRecords";
/// Key holding the serialized student roster.
pub const STUDENTS_KEY: &str = "masterStudentList";

pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[derive(Debug)]
pub enum SnapshotError {
    Storage(StorageError),
    Decode {
        key: String,
        source: serde_json::Error,
    },
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

impl SnapshotError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Storage(StorageError::QuotaExceeded { .. }) => "quota_exceeded",
            Self::Storage(StorageError::SchemaTooNew { .. }) => "schema_too_new",
            Self::Storage(StorageError::Sqlite(_)) => "storage_failed",
            Self::Decode { .. } => "decode_failed",
            Self::Encode { .. } => "encode_failed",
        }
    }
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Decode { key, source } => write!(f, "invalid snapshot under `{key}`: {source}"),
            Self::Encode { key, source } => {
                write!(f, "failed to encode snapshot for `{key}`: {source}")
            }
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Decode { source, .. } | Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<StorageError> for SnapshotError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Reads and decodes the snapshot under `key`. `Ok(None)` when absent.
pub fn read_snapshot<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> SnapshotResult<Option<T>> {
    let Some(raw) = store.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| SnapshotError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Encodes `value` and replaces the snapshot under `key`.
pub fn write_snapshot<T: Serialize + ?Sized>(
    store: &impl KeyValueStore,
    key: &str,
    value: &T,
) -> SnapshotResult<()> {
    let raw = serde_json::to_string(value).map_err(|source| SnapshotError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set_item(key, &raw)?;
    Ok(())
}

/// Loads the snapshot under `key`, falling back to `T::default()`.
///
/// Absent keys and corrupt values both yield the default; failures are
/// logged and never returned.
pub fn load_or_default<T: DeserializeOwned + Default>(store: &impl KeyValueStore, key: &str) -> T {
    match read_snapshot(store, key) {
        Ok(Some(value)) => {
            debug!("event=snapshot_load module=storage status=ok key={key}");
            value
        }
        Ok(None) => {
            debug!("event=snapshot_load module=storage status=empty key={key}");
            T::default()
        }
        Err(err) => {
            warn!(
                "event=snapshot_load module=storage status=error key={} error_code={} error={}",
                key,
                err.code(),
                err
            );
            T::default()
        }
    }
}

/// Writes the snapshot under `key`; returns whether the write landed.
///
/// A failed write is logged and leaves the previously stored value in place.
pub fn persist<T: Serialize + ?Sized>(store: &impl KeyValueStore, key: &str, value: &T) -> bool {
    match write_snapshot(store, key, value) {
        Ok(()) => {
            debug!("event=snapshot_save module=storage status=ok key={key}");
            true
        }
        Err(err) => {
            error!(
                "event=snapshot_save module=storage status=error key={} error_code={} error={}",
                key,
                err.code(),
                err
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{load_or_default, persist, read_snapshot, SnapshotError};
    use crate::storage::{KeyValueStore, MemoryKeyValueStore};

    #[test]
    fn read_snapshot_reports_decode_error_with_key() {
        let store = MemoryKeyValueStore::new();
        store.set_item("numbers", "[1, 2,").unwrap();

        let err = read_snapshot::<Vec<i64>>(&store, "numbers").unwrap_err();
        assert!(matches!(err, SnapshotError::Decode { ref key, .. } if key == "numbers"));
        assert_eq!(err.code(), "decode_failed");
    }

    #[test]
    fn load_or_default_falls_back_on_wrong_shape() {
        let store = MemoryKeyValueStore::new();
        store.set_item("numbers", r#"{"not":"a list"}"#).unwrap();

        let loaded: Vec<i64> = load_or_default(&store, "numbers");
        assert!(loaded.is_empty());
    }

    #[test]
    fn persist_reports_quota_failure_without_touching_old_value() {
        let store = MemoryKeyValueStore::with_quota(16);
        assert!(persist(&store, "n", &vec![1, 2]));
        assert!(!persist(&store, "n", &vec![1_000_000, 2_000_000, 3_000_000]));

        let loaded: Vec<i64> = load_or_default(&store, "n");
        assert_eq!(loaded, vec![1, 2]);
    }
}
