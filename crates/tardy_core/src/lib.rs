//! Core domain logic for the tardy log.
//! This crate is the single source of truth for record and roster invariants.

pub mod app;
pub mod db;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

pub use app::{DashboardView, TardyApp};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{generate_record_id, RecordId, TardyRecord};
pub use model::student::Student;
pub use model::time_window::{TimeWindow, TimeWindowParseError};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, RECORDS_KEY,
    STUDENTS_KEY,
};
pub use store::record_store::RecordStore;
pub use store::roster_store::{ImportSummary, RosterStore};
pub use view::{
    class_breakdown, compute_stats, compute_stats_at, distinct_classes, filter_records,
    filter_records_at, format_local_timestamp, ClassCount, TardyStats,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
