//! Domain model for students, tardy records and view filters.
//!
//! # Responsibility
//! - Define the serialized shapes persisted under the store keys.
//! - Keep identity rules (`nis` for students, `id` for records) in one place.
//!
//! # Invariants
//! - Serialized field names match the persisted layout (`class`, not
//!   `class_name`).
//! - Records are immutable once created; only whole-record deletion exists.

pub mod record;
pub mod student;
pub mod time_window;
