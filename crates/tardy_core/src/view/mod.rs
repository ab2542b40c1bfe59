//! Pure view derivations over records and roster.
//!
//! # Responsibility
//! - Filter records by time window and class.
//! - Compute aggregate counts independent of active filters.
//! - Derive class options and display strings for the report list.
//!
//! # Invariants
//! - No function here reads storage or mutates its inputs.
//! - Calendar comparisons happen in the time zone of the supplied `now`.
//! - Filtered output preserves input order.

mod classes;
mod filter;
mod labels;
mod stats;

pub use classes::distinct_classes;
pub use filter::{filter_records, filter_records_at, matches_class, matches_window};
pub use labels::{empty_state_message, format_local_timestamp, format_timestamp, report_title};
pub use stats::{class_breakdown, compute_stats, compute_stats_at, ClassCount, TardyStats};
