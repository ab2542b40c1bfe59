//! Application controller.
//!
//! # Responsibility
//! - Own both stores, the active filters and the import-interaction flag.
//! - Translate user intents into store mutations.
//! - Assemble view snapshots for the presentation layer.
//!
//! # Invariants
//! - This is the only writer of either store.
//! - Startup state is `TimeWindow::Day`, no class filter, import closed.
//! - Stats are computed from all records regardless of active filters.

use crate::model::record::TardyRecord;
use crate::model::student::Student;
use crate::model::time_window::TimeWindow;
use crate::storage::KeyValueStore;
use crate::store::record_store::RecordStore;
use crate::store::roster_store::{ImportSummary, RosterStore};
use crate::view::{
    class_breakdown, compute_stats_at, distinct_classes, empty_state_message, filter_records_at,
    report_title, ClassCount, TardyStats,
};
use chrono::{DateTime, Local, TimeZone};
use log::{debug, info};
use serde::Serialize;

/// Everything the report screen renders, derived from one state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub time_window: TimeWindow,
    pub class_filter: Option<String>,
    pub title: String,
    /// Shown instead of the table when `records` is empty.
    pub empty_message: String,
    /// Filtered records, newest-first.
    pub records: Vec<TardyRecord>,
    pub stats: TardyStats,
    /// Class filter options, ascending.
    pub classes: Vec<String>,
    pub class_breakdown: Vec<ClassCount>,
    pub import_open: bool,
}

/// Root state object of the tardy log.
pub struct TardyApp<K: KeyValueStore + Clone> {
    records: RecordStore<K>,
    roster: RosterStore<K>,
    time_window: TimeWindow,
    class_filter: Option<String>,
    import_open: bool,
}

impl<K: KeyValueStore + Clone> TardyApp<K> {
    /// Builds the controller and loads both stores from `storage`.
    pub fn open(storage: K) -> Self {
        let app = Self {
            records: RecordStore::load(storage.clone()),
            roster: RosterStore::load(storage),
            time_window: TimeWindow::default(),
            class_filter: None,
            import_open: false,
        };
        info!(
            "event=app_open module=app status=ok records={} students={}",
            app.records.len(),
            app.roster.len()
        );
        app
    }

    pub fn records(&self) -> &[TardyRecord] {
        self.records.records()
    }

    pub fn students(&self) -> &[Student] {
        self.roster.students()
    }

    pub fn add_record(&mut self, student: &Student) -> TardyRecord {
        self.records.add_record(student)
    }

    /// Adds a record for the roster student with `nis`.
    ///
    /// Returns `None` when no such student is on the roster.
    pub fn add_record_for_nis(&mut self, nis: &str) -> Option<TardyRecord> {
        let student = self.roster.find_by_nis(nis)?.clone();
        Some(self.records.add_record(&student))
    }

    pub fn delete_record(&mut self, id: &str) -> bool {
        self.records.delete_record(id)
    }

    pub fn open_import(&mut self) {
        self.import_open = true;
        debug!("event=import_open module=app status=ok");
    }

    /// Dismisses the import interaction without touching the roster.
    pub fn cancel_import(&mut self) {
        self.import_open = false;
        debug!("event=import_cancel module=app status=ok");
    }

    /// Merges parsed students into the roster and closes the import interaction.
    pub fn import_students(&mut self, incoming: Vec<Student>) -> ImportSummary {
        let summary = self.roster.import_students(incoming);
        self.import_open = false;
        summary
    }

    pub fn is_import_open(&self) -> bool {
        self.import_open
    }

    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    pub fn set_time_window(&mut self, window: TimeWindow) {
        self.time_window = window;
    }

    pub fn class_filter(&self) -> Option<&str> {
        self.class_filter.as_deref()
    }

    /// Selects one class, or all classes for `None`/empty input.
    pub fn set_class_filter(&mut self, class_filter: Option<String>) {
        self.class_filter = class_filter.filter(|class_name| !class_name.is_empty());
    }

    pub fn distinct_classes(&self) -> Vec<String> {
        distinct_classes(self.roster.students(), self.records.records())
    }

    pub fn stats_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TardyStats {
        compute_stats_at(self.records.records(), now)
    }

    /// Dashboard view against the local wall clock.
    pub fn snapshot(&self) -> DashboardView {
        self.snapshot_at(&Local::now())
    }

    pub fn snapshot_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DashboardView {
        let class_filter = self.class_filter();
        let records = filter_records_at(self.records.records(), self.time_window, class_filter, now)
            .into_iter()
            .cloned()
            .collect();

        DashboardView {
            time_window: self.time_window,
            class_filter: self.class_filter.clone(),
            title: report_title(self.time_window, class_filter),
            empty_message: empty_state_message(class_filter),
            records,
            stats: self.stats_at(now),
            classes: self.distinct_classes(),
            class_breakdown: class_breakdown(self.records.records()),
            import_open: self.import_open,
        }
    }
}
