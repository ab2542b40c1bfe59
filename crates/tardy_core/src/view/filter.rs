use crate::model::record::TardyRecord;
use crate::model::time_window::TimeWindow;
use chrono::{DateTime, Datelike, Local, TimeZone};

/// Returns whether an instant falls inside `window` relative to `now`.
///
/// `timestamp_ms` is projected into `now`'s time zone before the calendar
/// fields are compared. Out-of-range timestamps only match `All`.
pub fn matches_window<Tz: TimeZone>(timestamp_ms: i64, window: TimeWindow, now: &DateTime<Tz>) -> bool {
    if window == TimeWindow::All {
        return true;
    }
    let Some(at) = now.timezone().timestamp_millis_opt(timestamp_ms).single() else {
        return false;
    };
    match window {
        TimeWindow::Day => at.date_naive() == now.date_naive(),
        TimeWindow::Month => at.year() == now.year() && at.month() == now.month(),
        TimeWindow::All => true,
    }
}

/// `None` and the empty string both mean "all classes".
pub fn matches_class(record: &TardyRecord, class_filter: Option<&str>) -> bool {
    match class_filter {
        Some(class_name) if !class_name.is_empty() => record.class_name == class_name,
        _ => true,
    }
}

/// Filters `records` against the local wall clock.
pub fn filter_records<'a>(
    records: &'a [TardyRecord],
    window: TimeWindow,
    class_filter: Option<&str>,
) -> Vec<&'a TardyRecord> {
    filter_records_at(records, window, class_filter, &Local::now())
}

/// Filters `records` by class and time window relative to `now`.
pub fn filter_records_at<'a, Tz: TimeZone>(
    records: &'a [TardyRecord],
    window: TimeWindow,
    class_filter: Option<&str>,
    now: &DateTime<Tz>,
) -> Vec<&'a TardyRecord> {
    records
        .iter()
        .filter(|record| matches_class(record, class_filter))
        .filter(|record| matches_window(record.timestamp, window, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_records_at, matches_window};
    use crate::model::record::TardyRecord;
    use crate::model::time_window::TimeWindow;
    use chrono::{FixedOffset, TimeZone};

    fn record(id: &str, class_name: &str, timestamp: i64) -> TardyRecord {
        TardyRecord {
            id: id.to_string(),
            name: format!("student-{id}"),
            nis: id.to_string(),
            class_name: class_name.to_string(),
            timestamp,
        }
    }

    #[test]
    fn day_boundary_uses_now_time_zone() {
        // 2026-10-17 00:30 in UTC+7 is still 2026-10-16 in UTC.
        let wib = FixedOffset::east_opt(7 * 3600).unwrap();
        let now = wib.with_ymd_and_hms(2026, 10, 17, 0, 30, 0).unwrap();
        let earlier_same_local_day = wib.with_ymd_and_hms(2026, 10, 17, 0, 5, 0).unwrap();
        let previous_local_day = wib.with_ymd_and_hms(2026, 10, 16, 23, 55, 0).unwrap();

        assert!(matches_window(
            earlier_same_local_day.timestamp_millis(),
            TimeWindow::Day,
            &now
        ));
        assert!(!matches_window(
            previous_local_day.timestamp_millis(),
            TimeWindow::Day,
            &now
        ));
        assert!(matches_window(
            previous_local_day.timestamp_millis(),
            TimeWindow::Month,
            &now
        ));
    }

    #[test]
    fn month_requires_same_year() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let now = utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let last_year = utc.with_ymd_and_hms(2025, 10, 17, 12, 0, 0).unwrap();
        assert!(!matches_window(last_year.timestamp_millis(), TimeWindow::Month, &now));
        assert!(matches_window(last_year.timestamp_millis(), TimeWindow::All, &now));
    }

    #[test]
    fn class_and_window_combine_and_keep_order() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let now = utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let today = now.timestamp_millis();
        let records = vec![
            record("3", "7A", today),
            record("2", "7B", today),
            record("1", "7A", today - 3 * 24 * 3600 * 1000),
        ];

        let day_7a = filter_records_at(&records, TimeWindow::Day, Some("7A"), &now);
        assert_eq!(day_7a.len(), 1);
        assert_eq!(day_7a[0].id, "3");

        let month_7a = filter_records_at(&records, TimeWindow::Month, Some("7A"), &now);
        let ids: Vec<_> = month_7a.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["3", "1"]);

        let all_any = filter_records_at(&records, TimeWindow::All, Some(""), &now);
        assert_eq!(all_any.len(), 3);
    }
}
