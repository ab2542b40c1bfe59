//! In-memory stores backed by key-value snapshots.
//!
//! # Responsibility
//! - Own the record sequence and the student roster.
//! - Rewrite the full snapshot after every mutation.
//!
//! # Invariants
//! - Records are ordered newest-first.
//! - Record ids are unique within a store.
//! - The roster holds at most one student per `nis`.

pub mod record_store;
pub mod roster_store;
