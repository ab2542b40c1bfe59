use super::filter::matches_window;
use crate::model::record::TardyRecord;
use crate::model::time_window::TimeWindow;
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate counts over the full, unfiltered record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TardyStats {
    pub today_count: usize,
    pub this_month_count: usize,
    pub total_count: usize,
}

/// Record count for one class label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassCount {
    pub class_name: String,
    pub count: usize,
}

/// Computes stats against the local wall clock.
pub fn compute_stats(records: &[TardyRecord]) -> TardyStats {
    compute_stats_at(records, &Local::now())
}

/// Computes stats relative to `now`.
///
/// Active time/class filters never apply here; counts cover every record.
pub fn compute_stats_at<Tz: TimeZone>(records: &[TardyRecord], now: &DateTime<Tz>) -> TardyStats {
    let count = |window| {
        records
            .iter()
            .filter(|record| matches_window(record.timestamp, window, now))
            .count()
    };
    TardyStats {
        today_count: count(TimeWindow::Day),
        this_month_count: count(TimeWindow::Month),
        total_count: records.len(),
    }
}

/// Per-class record counts, sorted by class label.
pub fn class_breakdown(records: &[TardyRecord]) -> Vec<ClassCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.class_name.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(class_name, count)| ClassCount {
            class_name: class_name.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{class_breakdown, compute_stats_at, ClassCount, TardyStats};
    use crate::model::record::TardyRecord;
    use crate::model::student::Student;
    use chrono::{TimeZone, Utc};

    #[test]
    fn counts_today_month_and_total() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let student = Student::new("A", "001", "7A");
        let records = vec![
            TardyRecord::from_student(&student, now.timestamp_millis()),
            TardyRecord::from_student(
                &student,
                Utc.with_ymd_and_hms(2026, 10, 2, 7, 0, 0).unwrap().timestamp_millis(),
            ),
            TardyRecord::from_student(
                &student,
                Utc.with_ymd_and_hms(2026, 9, 30, 7, 0, 0).unwrap().timestamp_millis(),
            ),
        ];

        assert_eq!(
            compute_stats_at(&records, &now),
            TardyStats {
                today_count: 1,
                this_month_count: 2,
                total_count: 3,
            }
        );
    }

    #[test]
    fn breakdown_groups_by_class() {
        let records = vec![
            TardyRecord::from_student(&Student::new("A", "001", "7B"), 0),
            TardyRecord::from_student(&Student::new("B", "002", "7A"), 0),
            TardyRecord::from_student(&Student::new("C", "003", "7B"), 0),
        ];

        assert_eq!(
            class_breakdown(&records),
            vec![
                ClassCount {
                    class_name: "7A".to_string(),
                    count: 1
                },
                ClassCount {
                    class_name: "7B".to_string(),
                    count: 2
                },
            ]
        );
    }
}
