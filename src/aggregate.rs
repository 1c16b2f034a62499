//! Identity-based aggregation of validated records into student profiles.

use tracing::info;

use crate::error::AnalyzeError;
use crate::model::{Record, Roster};

/// Groups records by roll number into a [`Roster`] of students.
///
/// Two documented data-quality policies apply, preserved from the source
/// data semantics rather than "fixed":
///
/// * the first `Gender` value seen for a roll number wins; later differing
///   values are ignored;
/// * a repeated `(roll_no, subject)` pair is last-write-wins.
///
/// Roster iteration order is the first appearance of each roll number in
/// the input sequence, which keeps report ordering reproducible.
///
/// # Errors
///
/// Returns [`AnalyzeError::EmptyDataset`] if `records` is empty.
pub fn aggregate(records: &[Record]) -> Result<Roster, AnalyzeError> {
    if records.is_empty() {
        return Err(AnalyzeError::EmptyDataset("aggregate"));
    }

    let mut roster = Roster::default();
    for record in records {
        roster.note_subject(&record.subject);
        let student = roster.entry(&record.roll_no, &record.name, record.gender.as_deref());
        student.add_mark(&record.subject, record.mark);
    }

    info!(students = roster.len(), "Built student roster");
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(roll_no: &str, name: &str, subject: &str, mark: f64) -> Record {
        Record {
            name: name.to_string(),
            roll_no: roll_no.to_string(),
            gender: None,
            subject: subject.to_string(),
            mark,
            attendance: None,
        }
    }

    #[test]
    fn test_aggregate_groups_by_roll_no() {
        let records = vec![
            record("R1", "Aman", "Math", 78.0),
            record("R1", "Aman", "Physics", 72.0),
            record("R2", "Nisha", "Math", 88.0),
        ];
        let roster = aggregate(&records).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("R1").unwrap().subject_count(), 2);
        assert_eq!(roster.get("R2").unwrap().subject_count(), 1);
    }

    #[test]
    fn test_aggregate_is_last_write_wins_per_subject() {
        let records = vec![
            record("R1", "Aman", "Math", 70.0),
            record("R1", "Aman", "Math", 80.0),
        ];
        let roster = aggregate(&records).unwrap();
        assert_eq!(roster.get("R1").unwrap().mark("Math"), Some(80.0));
    }

    #[test]
    fn test_aggregate_keeps_first_gender() {
        let mut first = record("R1", "Aman", "Math", 70.0);
        first.gender = Some("M".to_string());
        let mut second = record("R1", "Aman", "Physics", 75.0);
        second.gender = Some("F".to_string());

        let roster = aggregate(&[first, second]).unwrap();
        assert_eq!(roster.get("R1").unwrap().gender.as_deref(), Some("M"));
    }

    #[test]
    fn test_aggregate_preserves_first_appearance_order() {
        let records = vec![
            record("R3", "Ravi", "Math", 54.0),
            record("R1", "Aman", "Math", 78.0),
            record("R3", "Ravi", "Physics", 47.0),
            record("R2", "Nisha", "Math", 88.0),
        ];
        let roster = aggregate(&records).unwrap();
        let rolls: Vec<&str> = roster.students().iter().map(|s| s.roll_no.as_str()).collect();
        assert_eq!(rolls, ["R3", "R1", "R2"]);
    }

    #[test]
    fn test_aggregate_empty_input_is_an_error() {
        assert!(matches!(
            aggregate(&[]),
            Err(AnalyzeError::EmptyDataset("aggregate"))
        ));
    }
}
