//! Display strings for the report list.

use crate::model::time_window::TimeWindow;
use chrono::{Datelike, Local, TimeZone, Timelike};

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Heading for the record list, e.g. `Laporan 7A - Hari Ini`.
pub fn report_title(window: TimeWindow, class_filter: Option<&str>) -> String {
    match non_empty(class_filter) {
        Some(class_name) => format!("Laporan {class_name} - {}", window.label()),
        None => format!("Laporan {}", window.label()),
    }
}

/// Text shown when the filtered list is empty.
pub fn empty_state_message(class_filter: Option<&str>) -> String {
    match non_empty(class_filter) {
        Some(class_name) => {
            format!("Tidak ada data keterlambatan untuk kelas {class_name} pada periode ini.")
        }
        None => "Tidak ada data keterlambatan pada periode ini.".to_string(),
    }
}

/// Formats a record time as `17 Okt 2026 07.45` in `tz`.
///
/// Returns `None` for timestamps chrono cannot represent.
pub fn format_timestamp<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> Option<String> {
    let at = tz.timestamp_millis_opt(timestamp_ms).single()?;
    Some(format!(
        "{:02} {} {} {:02}.{:02}",
        at.day(),
        MONTHS_SHORT[at.month0() as usize],
        at.year(),
        at.hour(),
        at.minute()
    ))
}

/// `format_timestamp` in the local time zone.
pub fn format_local_timestamp(timestamp_ms: i64) -> Option<String> {
    format_timestamp(timestamp_ms, &Local)
}

fn non_empty(class_filter: Option<&str>) -> Option<&str> {
    class_filter.filter(|class_name| !class_name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{empty_state_message, format_timestamp, report_title};
    use crate::model::time_window::TimeWindow;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn title_includes_class_when_selected() {
        assert_eq!(report_title(TimeWindow::Day, None), "Laporan Hari Ini");
        assert_eq!(
            report_title(TimeWindow::Month, Some("7A")),
            "Laporan 7A - Bulan Ini"
        );
        assert_eq!(report_title(TimeWindow::All, Some("")), "Laporan Semua Waktu");
    }

    #[test]
    fn empty_state_mentions_class() {
        assert_eq!(
            empty_state_message(Some("8B")),
            "Tidak ada data keterlambatan untuk kelas 8B pada periode ini."
        );
    }

    #[test]
    fn timestamp_uses_given_zone() {
        let wib = FixedOffset::east_opt(7 * 3600).unwrap();
        let at = wib.with_ymd_and_hms(2026, 10, 7, 7, 5, 0).unwrap();
        assert_eq!(
            format_timestamp(at.timestamp_millis(), &wib).as_deref(),
            Some("07 Okt 2026 07.05")
        );
    }
}
