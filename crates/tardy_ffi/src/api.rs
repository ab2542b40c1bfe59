//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Relay user intents (add, delete, import, filter) into `TardyApp`.
//! - Flatten core views into plain envelopes the UI renders directly.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens the store, loads both snapshots and drops the
//!   connection before returning; nothing is cached between calls.
//! - Filters are owned by the UI and passed in on each dashboard call.

use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use tardy_core::db::open_db;
use tardy_core::{
    core_version as core_version_inner, format_local_timestamp,
    init_logging as init_logging_inner, ping as ping_inner, DashboardView, SqliteKeyValueStore,
    Student, TardyApp, TardyRecord, TimeWindow,
};

const STORE_FILE_NAME: &str = "tardy_log.sqlite3";
static STORE_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the store file used by all later calls.
///
/// Must be called before the first store-backed call; otherwise the default
/// temp-dir file is pinned. Returns an empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "store path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = STORE_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "store already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Roster entry as exchanged with the import dialog and student picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentEntry {
    pub name: String,
    pub nis: String,
    pub class_name: String,
}

/// One row of the report table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordItem {
    pub id: String,
    pub name: String,
    pub nis: String,
    pub class_name: String,
    pub timestamp_ms: i64,
    /// Local time such as `17 Okt 2026 07.45`.
    pub display_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCountItem {
    pub class_name: String,
    pub count: u32,
}

/// Full report screen payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardResponse {
    pub ok: bool,
    pub message: String,
    /// Effective window (`day|month|all`).
    pub time_window: String,
    pub title: String,
    pub empty_message: String,
    pub items: Vec<RecordItem>,
    pub today_count: u32,
    pub this_month_count: u32,
    pub total_count: u32,
    pub classes: Vec<String>,
    pub class_breakdown: Vec<ClassCountItem>,
}

/// Result envelope for mutating actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TardyActionResponse {
    pub ok: bool,
    /// Id of the created record, for `tardy_add_record`.
    pub record_id: Option<String>,
    pub message: String,
}

impl TardyActionResponse {
    fn success(message: impl Into<String>, record_id: Option<String>) -> Self {
        Self {
            ok: true,
            record_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: message.into(),
        }
    }
}

/// Records the roster student with `nis` as late now.
#[flutter_rust_bridge::frb(sync)]
pub fn tardy_add_record(nis: String) -> TardyActionResponse {
    let nis = nis.trim().to_string();
    match with_app(|app| app.add_record_for_nis(&nis)) {
        Ok(Some(record)) => TardyActionResponse::success("Record added.", Some(record.id)),
        Ok(None) => TardyActionResponse::failure(format!(
            "tardy_add_record failed: no student with NIS `{nis}`"
        )),
        Err(err) => TardyActionResponse::failure(format!("tardy_add_record failed: {err}")),
    }
}

/// Deletes one record by id. Unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn tardy_delete_record(id: String) -> TardyActionResponse {
    match with_app(|app| app.delete_record(id.trim())) {
        Ok(true) => TardyActionResponse::success("Record deleted.", None),
        Ok(false) => TardyActionResponse::success("Record already absent.", None),
        Err(err) => TardyActionResponse::failure(format!("tardy_delete_record failed: {err}")),
    }
}

/// Merges parsed students into the roster by NIS.
///
/// Entries with a blank NIS are skipped.
#[flutter_rust_bridge::frb(sync)]
pub fn tardy_import_students(students: Vec<StudentEntry>) -> TardyActionResponse {
    let received = students.len();
    let incoming: Vec<Student> = students
        .into_iter()
        .filter_map(to_core_student)
        .collect();
    let skipped = received - incoming.len();
    if skipped > 0 {
        warn!("event=ffi_import module=ffi status=partial skipped={skipped}");
    }

    match with_app(|app| app.import_students(incoming)) {
        Ok(summary) => TardyActionResponse::success(
            format!(
                "Imported {} new and {} updated student(s); {} skipped.",
                summary.added, summary.replaced, skipped
            ),
            None,
        ),
        Err(err) => TardyActionResponse::failure(format!("tardy_import_students failed: {err}")),
    }
}

/// Current roster for the student picker. Empty on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn tardy_students() -> Vec<StudentEntry> {
    match with_app(|app| app.students().iter().map(to_student_entry).collect::<Vec<_>>()) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("event=ffi_students module=ffi status=error error={err}");
            Vec::new()
        }
    }
}

/// Builds the report screen for `time_window` (`day|month|all`) and an
/// optional class filter (`None` or empty means all classes).
#[flutter_rust_bridge::frb(sync)]
pub fn tardy_dashboard(time_window: String, class_filter: Option<String>) -> DashboardResponse {
    let window = match time_window.parse::<TimeWindow>() {
        Ok(window) => window,
        Err(err) => {
            return DashboardResponse {
                message: format!("tardy_dashboard failed: {err}"),
                ..DashboardResponse::default()
            }
        }
    };
    let class_filter = class_filter.map(|value| value.trim().to_string());

    match with_app(|app| {
        app.set_time_window(window);
        app.set_class_filter(class_filter);
        app.snapshot()
    }) {
        Ok(view) => to_dashboard_response(view),
        Err(err) => DashboardResponse {
            message: format!("tardy_dashboard failed: {err}"),
            time_window: window.as_str().to_string(),
            ..DashboardResponse::default()
        },
    }
}

fn resolve_store_path() -> PathBuf {
    STORE_PATH
        .get_or_init(|| std::env::temp_dir().join(STORE_FILE_NAME))
        .clone()
}

fn with_app<T>(f: impl FnOnce(&mut TardyApp<SqliteKeyValueStore<'_>>) -> T) -> Result<T, String> {
    let conn =
        open_db(resolve_store_path()).map_err(|err| format!("store open failed: {err}"))?;
    let mut app = TardyApp::open(SqliteKeyValueStore::new(&conn));
    Ok(f(&mut app))
}

fn to_core_student(entry: StudentEntry) -> Option<Student> {
    let nis = entry.nis.trim();
    if nis.is_empty() {
        return None;
    }
    Some(Student::new(
        entry.name.trim(),
        nis,
        entry.class_name.trim(),
    ))
}

fn to_student_entry(student: &Student) -> StudentEntry {
    StudentEntry {
        name: student.name.clone(),
        nis: student.nis.clone(),
        class_name: student.class_name.clone(),
    }
}

fn to_record_item(record: TardyRecord) -> RecordItem {
    RecordItem {
        display_time: format_local_timestamp(record.timestamp).unwrap_or_default(),
        id: record.id,
        name: record.name,
        nis: record.nis,
        class_name: record.class_name,
        timestamp_ms: record.timestamp,
    }
}

fn to_dashboard_response(view: DashboardView) -> DashboardResponse {
    let message = if view.records.is_empty() {
        view.empty_message.clone()
    } else {
        format!("Showing {} record(s).", view.records.len())
    };
    DashboardResponse {
        ok: true,
        message,
        time_window: view.time_window.as_str().to_string(),
        title: view.title,
        empty_message: view.empty_message,
        items: view.records.into_iter().map(to_record_item).collect(),
        today_count: count_u32(view.stats.today_count),
        this_month_count: count_u32(view.stats.this_month_count),
        total_count: count_u32(view.stats.total_count),
        classes: view.classes,
        class_breakdown: view
            .class_breakdown
            .into_iter()
            .map(|entry| ClassCountItem {
                class_name: entry.class_name,
                count: count_u32(entry.count),
            })
            .collect(),
    }
}

fn count_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
