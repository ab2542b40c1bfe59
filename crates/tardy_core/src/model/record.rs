//! Tardy record model and id generation.
//!
//! # Invariants
//! - `id` is generated once at creation and never reused.
//! - `timestamp` is Unix epoch milliseconds of the creation instant.

use super::student::Student;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a tardy record.
///
/// Kept as a plain string so ids written by earlier builds still load.
pub type RecordId = String;

/// One instance of a student being recorded late.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TardyRecord {
    pub id: RecordId,
    pub name: String,
    pub nis: String,
    /// Class label copied from the roster at creation time.
    #[serde(rename = "class")]
    pub class_name: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

impl TardyRecord {
    /// Creates a record for `student` stamped at `timestamp_ms`, with a fresh id.
    pub fn from_student(student: &Student, timestamp_ms: i64) -> Self {
        Self {
            id: generate_record_id(timestamp_ms),
            name: student.name.clone(),
            nis: student.nis.clone(),
            class_name: student.class_name.clone(),
            timestamp: timestamp_ms,
        }
    }
}

/// Builds a record id of the form `<timestamp_ms>-<32 hex chars>`.
///
/// The suffix is a v4 UUID (122 random bits), so ids created in the same
/// millisecond still differ with overwhelming probability.
pub fn generate_record_id(timestamp_ms: i64) -> RecordId {
    format!("{timestamp_ms}-{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::{generate_record_id, TardyRecord};
    use crate::model::student::Student;
    use std::collections::HashSet;

    #[test]
    fn from_student_copies_identity_fields() {
        let student = Student::new("Budi", "001", "7A");
        let record = TardyRecord::from_student(&student, 1_700_000_000_000);

        assert_eq!(record.name, "Budi");
        assert_eq!(record.nis, "001");
        assert_eq!(record.class_name, "7A");
        assert_eq!(record.timestamp, 1_700_000_000_000);
        assert!(record.id.starts_with("1700000000000-"));
    }

    #[test]
    fn ids_within_one_millisecond_are_distinct() {
        let ids: HashSet<_> = (0..1_000).map(|_| generate_record_id(42)).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn loads_records_written_with_short_ids() {
        let json = r#"{"id":"1700000000000-k3j9x0a1b","name":"Sari","nis":"002","class":"8B","timestamp":1700000000000}"#;
        let record: TardyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1700000000000-k3j9x0a1b");
        assert_eq!(record.class_name, "8B");
    }
}
