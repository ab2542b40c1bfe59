//! Student roster store under `masterStudentList`.

use crate::model::student::Student;
use crate::storage::{load_or_default, persist, KeyValueStore, STUDENTS_KEY};
use log::{info, warn};
use std::collections::{HashMap, HashSet};

/// Outcome counts of one roster import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Students whose `nis` was not on the roster before.
    pub added: usize,
    /// Pre-existing roster entries overwritten by the import, each counted once.
    pub replaced: usize,
    /// Roster size after the merge.
    pub total: usize,
}

/// Roster of students keyed by `nis`.
///
/// Order: existing entries keep their position, an overwrite happens in
/// place, new students are appended in incoming order.
pub struct RosterStore<K: KeyValueStore> {
    storage: K,
    students: Vec<Student>,
}

impl<K: KeyValueStore> RosterStore<K> {
    /// Creates an empty roster without reading storage.
    pub fn new(storage: K) -> Self {
        Self {
            storage,
            students: Vec::new(),
        }
    }

    /// Creates a roster and loads the persisted snapshot.
    pub fn load(storage: K) -> Self {
        let mut roster = Self::new(storage);
        roster.load_from_persistence();
        roster
    }

    /// Replaces the roster with the persisted snapshot.
    ///
    /// A missing or corrupt snapshot leaves the roster empty. Repeated `nis`
    /// values in the snapshot collapse to the later entry.
    pub fn load_from_persistence(&mut self) {
        let stored: Vec<Student> = load_or_default(&self.storage, STUDENTS_KEY);
        let stored_count = stored.len();
        let mut index = HashMap::with_capacity(stored_count);
        let mut students = Vec::with_capacity(stored_count);
        for student in stored {
            upsert(&mut students, &mut index, student);
        }
        self.students = students;

        let collapsed = stored_count - self.students.len();
        if collapsed > 0 {
            warn!(
                "event=store_load module=store status=repaired key={} collapsed={}",
                STUDENTS_KEY, collapsed
            );
        }
        info!(
            "event=store_load module=store status=ok key={} count={}",
            STUDENTS_KEY,
            self.students.len()
        );
    }

    /// Merges `incoming` into the roster by `nis`, last write wins.
    ///
    /// Entries absent from `incoming` are retained. An empty import leaves
    /// the roster unchanged.
    pub fn import_students(&mut self, incoming: impl IntoIterator<Item = Student>) -> ImportSummary {
        let existing = std::mem::take(&mut self.students);
        let mut merged: Vec<Student> = Vec::with_capacity(existing.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(existing.len());

        for student in existing {
            upsert(&mut merged, &mut index, student);
        }
        // Positions below this were on the roster before the import.
        let existing_len = merged.len();
        let mut replaced_positions = HashSet::new();
        let mut summary = ImportSummary::default();
        for student in incoming {
            match upsert(&mut merged, &mut index, student) {
                Some(position) if position < existing_len => {
                    if replaced_positions.insert(position) {
                        summary.replaced += 1;
                    }
                }
                Some(_) => {}
                None => summary.added += 1,
            }
        }
        self.students = merged;
        summary.total = self.students.len();

        let persisted = persist(&self.storage, STUDENTS_KEY, &self.students);
        info!(
            "event=roster_import module=store status=ok added={} replaced={} total={} persisted={}",
            summary.added, summary.replaced, summary.total, persisted
        );
        summary
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn find_by_nis(&self, nis: &str) -> Option<&Student> {
        self.students.iter().find(|student| student.nis == nis)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

/// Inserts or overwrites by `nis`. Returns the overwritten position, if any.
fn upsert(
    merged: &mut Vec<Student>,
    index: &mut HashMap<String, usize>,
    student: Student,
) -> Option<usize> {
    match index.get(&student.nis) {
        Some(&position) => {
            merged[position] = student;
            Some(position)
        }
        None => {
            index.insert(student.nis.clone(), merged.len());
            merged.push(student);
            None
        }
    }
}
