use crate::model::record::TardyRecord;
use crate::model::student::Student;
use std::collections::BTreeSet;

/// Distinct class labels across roster and records, ascending.
pub fn distinct_classes(roster: &[Student], records: &[TardyRecord]) -> Vec<String> {
    roster
        .iter()
        .map(|student| student.class_name.as_str())
        .chain(records.iter().map(|record| record.class_name.as_str()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::distinct_classes;
    use crate::model::record::TardyRecord;
    use crate::model::student::Student;

    #[test]
    fn merges_roster_and_record_classes() {
        let roster = vec![Student::new("A", "001", "9C"), Student::new("B", "002", "7A")];
        let records = vec![TardyRecord::from_student(&Student::new("Gone", "099", "8B"), 0)];

        assert_eq!(distinct_classes(&roster, &records), ["7A", "8B", "9C"]);
    }

    #[test]
    fn empty_inputs_yield_no_classes() {
        assert!(distinct_classes(&[], &[]).is_empty());
    }
}
