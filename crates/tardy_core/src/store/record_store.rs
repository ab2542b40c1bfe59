//! Record store: newest-first tardy records under `tardyRecords`.

use crate::model::record::{generate_record_id, TardyRecord};
use crate::model::student::Student;
use crate::storage::{load_or_default, persist, KeyValueStore, RECORDS_KEY};
use chrono::Utc;
use log::info;

/// Owned sequence of tardy records plus its storage handle.
pub struct RecordStore<K: KeyValueStore> {
    storage: K,
    records: Vec<TardyRecord>,
}

impl<K: KeyValueStore> RecordStore<K> {
    /// Creates an empty store without reading storage.
    pub fn new(storage: K) -> Self {
        Self {
            storage,
            records: Vec::new(),
        }
    }

    /// Creates a store and loads the persisted snapshot.
    pub fn load(storage: K) -> Self {
        let mut store = Self::new(storage);
        store.load_from_persistence();
        store
    }

    /// Replaces in-memory records with the persisted snapshot.
    ///
    /// A missing or corrupt snapshot leaves the store empty.
    pub fn load_from_persistence(&mut self) {
        self.records = load_or_default(&self.storage, RECORDS_KEY);
        info!(
            "event=store_load module=store status=ok key={} count={}",
            RECORDS_KEY,
            self.records.len()
        );
    }

    /// Records `student` as late now and returns the new record.
    pub fn add_record(&mut self, student: &Student) -> TardyRecord {
        self.add_record_at(student, Utc::now().timestamp_millis())
    }

    /// Records `student` as late at `timestamp_ms` and returns the new record.
    ///
    /// The record is inserted at position 0.
    pub fn add_record_at(&mut self, student: &Student, timestamp_ms: i64) -> TardyRecord {
        let mut record = TardyRecord::from_student(student, timestamp_ms);
        while self.get(&record.id).is_some() {
            record.id = generate_record_id(timestamp_ms);
        }
        self.records.insert(0, record.clone());

        let persisted = self.save();
        info!(
            "event=record_add module=store status=ok count={} persisted={}",
            self.records.len(),
            persisted
        );
        record
    }

    /// Removes the record with `id`. Returns whether a record was removed.
    ///
    /// Deleting an unknown id is a no-op, not an error.
    pub fn delete_record(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        let removed = self.records.len() != before;

        let persisted = self.save();
        info!(
            "event=record_delete module=store status=ok removed={} count={} persisted={}",
            removed,
            self.records.len(),
            persisted
        );
        removed
    }

    /// Records in newest-first order.
    pub fn records(&self) -> &[TardyRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&TardyRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn save(&self) -> bool {
        persist(&self.storage, RECORDS_KEY, &self.records)
    }
}
