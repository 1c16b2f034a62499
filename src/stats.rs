//! Descriptive statistics, ranking, and summary-table construction.

use std::cmp::Ordering;

use tracing::warn;

use crate::error::AnalyzeError;
use crate::grade::grade;
use crate::model::{Record, Roster, Student, SubjectStats, SummaryRow};

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the population standard deviation given a pre-computed mean.
/// Returns 0.0 for empty input.
///
/// Population (divide by N) rather than sample (N-1) is the documented
/// choice for this pipeline; every stddev in the crate uses it.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

/// Computes per-subject mean/min/max/stddev over the full validated record
/// set, one row per distinct subject in first-appearance order.
///
/// # Errors
///
/// Returns [`AnalyzeError::EmptyDataset`] if `records` is empty.
pub fn subject_stats(records: &[Record]) -> Result<Vec<SubjectStats>, AnalyzeError> {
    if records.is_empty() {
        return Err(AnalyzeError::EmptyDataset("subject_stats"));
    }

    let mut order: Vec<&str> = Vec::new();
    for record in records {
        if !order.contains(&record.subject.as_str()) {
            order.push(&record.subject);
        }
    }

    let stats = order
        .iter()
        .map(|subject| {
            let marks: Vec<f64> = records
                .iter()
                .filter(|r| r.subject == *subject)
                .map(|r| r.mark)
                .collect();
            let m = mean(&marks);
            SubjectStats {
                subject: subject.to_string(),
                mean: m,
                min: marks.iter().copied().fold(f64::INFINITY, f64::min),
                max: marks.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                stddev: stddev(&marks, m),
            }
        })
        .collect();

    Ok(stats)
}

/// Ranks students by average, descending, and returns `(top_n, bottom_n)`.
///
/// The sort is stable, so ties keep their aggregation order. `bottom_n` is
/// the tail of the descending order (its last entry is the weakest
/// student). When `n` exceeds the population both lists clamp to the full
/// population. Students with no marks cannot be ranked; they are skipped
/// with a recorded warning rather than aborting the batch.
pub fn rank(roster: &Roster, n: usize, warnings: &mut Vec<String>) -> (Vec<Student>, Vec<Student>) {
    let mut ranked: Vec<(&Student, f64)> = Vec::with_capacity(roster.len());
    for student in roster.students() {
        match student.average() {
            Ok(avg) => ranked.push((student, avg)),
            Err(e) => {
                warn!(roll_no = %student.roll_no, "Skipping unrankable student");
                warnings.push(format!("ranking skipped: {e}"));
            }
        }
    }

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let k = n.min(ranked.len());
    let top = ranked[..k].iter().map(|(s, _)| (*s).clone()).collect();
    let bottom = ranked[ranked.len() - k..]
        .iter()
        .map(|(s, _)| (*s).clone())
        .collect();
    (top, bottom)
}

/// Flattens the roster into export-ready summary rows, one per student, in
/// roster order. Mark cells align with the roster's subject order.
/// Students with no marks are skipped with a recorded warning.
pub fn summary_table(roster: &Roster, warnings: &mut Vec<String>) -> Vec<SummaryRow> {
    let mut rows = Vec::with_capacity(roster.len());
    for student in roster.students() {
        let average = match student.average() {
            Ok(avg) => avg,
            Err(e) => {
                warn!(roll_no = %student.roll_no, "Skipping student with no marks");
                warnings.push(format!("summary skipped: {e}"));
                continue;
            }
        };
        rows.push(SummaryRow {
            roll_no: student.roll_no.clone(),
            name: student.name.clone(),
            gender: student.gender.clone(),
            marks: roster
                .subjects()
                .iter()
                .map(|subject| student.mark(subject))
                .collect(),
            total: student.total(),
            average,
            grade: grade(average),
        });
    }
    rows
}

/// Mean of all `average` values in the summary table, at full precision.
///
/// # Errors
///
/// Returns [`AnalyzeError::EmptyDataset`] on an empty table.
pub fn class_average(rows: &[SummaryRow]) -> Result<f64, AnalyzeError> {
    if rows.is_empty() {
        return Err(AnalyzeError::EmptyDataset("class_average"));
    }
    let averages: Vec<f64> = rows.iter().map(|r| r.average).collect();
    Ok(mean(&averages))
}
