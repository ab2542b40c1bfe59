//! Persistent store adapter.
//!
//! # Responsibility
//! - Provide a string key-value contract (`KeyValueStore`) over SQLite or
//!   process memory.
//! - Encode/decode whole-store JSON snapshots under fixed keys.
//! - Downgrade every read/write failure to a fallback value plus a log event.
//!
//! # Invariants
//! - Each store snapshot lives under exactly one key and is rewritten in full.
//! - `load_or_default` and `persist` never return an error to the caller.

mod kv;
mod snapshot;

pub use kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult};
pub use snapshot::{
    load_or_default, persist, read_snapshot, write_snapshot, SnapshotError, SnapshotResult,
    RECORDS_KEY, STUDENTS_KEY,
};
