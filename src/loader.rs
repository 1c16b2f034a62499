//! CSV loading and row-level validation.
//!
//! The loader is the only place raw tabular cells are touched. It enforces
//! the schema, coerces marks to numbers, drops dirty rows, and hands the
//! rest of the pipeline a fully typed record sequence.

use std::path::Path;

use tracing::{debug, info};

use crate::error::AnalyzeError;
use crate::model::Record;

/// Columns that must be present for a load to proceed at all.
const REQUIRED_COLUMNS: [&str; 4] = ["Name", "Roll_No", "Subject", "Marks"];

/// Result of a load: the surviving records plus the tally of dropped rows.
/// Rejected rows are counted, never echoed.
#[derive(Debug)]
pub struct LoadOutcome {
    pub records: Vec<Record>,
    pub rejected_rows: usize,
}

/// Loads and validates a student marks CSV.
///
/// Required columns are `Name`, `Roll_No`, `Subject`, `Marks`; `Gender` and
/// `Attendance` are optional and any extra columns are ignored. Rows whose
/// mark fails numeric coercion or falls outside `[0, 100]`, or whose
/// identity fields are empty, are dropped and counted. One malformed line
/// must not abort the whole load.
///
/// # Errors
///
/// * [`AnalyzeError::MissingColumns`] if any required column is absent.
/// * [`AnalyzeError::EmptyDataset`] if zero rows survive validation.
pub fn load(path: &Path) -> Result<LoadOutcome, AnalyzeError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h == *c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AnalyzeError::MissingColumns(missing));
    }

    let col = |name: &str| headers.iter().position(|h| h == name);
    let name_idx = col("Name").unwrap();
    let roll_idx = col("Roll_No").unwrap();
    let subject_idx = col("Subject").unwrap();
    let marks_idx = col("Marks").unwrap();
    let gender_idx = col("Gender");
    let attendance_idx = col("Attendance");

    let mut records = Vec::new();
    let mut rejected_rows = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                debug!(row = row_no, error = %e, "Row unreadable, dropping");
                rejected_rows += 1;
                continue;
            }
        };

        let field = |idx: usize| row.get(idx).unwrap_or("").trim();

        let name = field(name_idx);
        let roll_no = field(roll_idx);
        let subject = field(subject_idx);

        if name.is_empty() || roll_no.is_empty() || subject.is_empty() {
            debug!(row = row_no, "Empty identity field, dropping row");
            rejected_rows += 1;
            continue;
        }

        let mark = match field(marks_idx).parse::<f64>() {
            Ok(m) if (0.0..=100.0).contains(&m) => m,
            Ok(_) => {
                debug!(row = row_no, "Mark outside [0, 100], dropping row");
                rejected_rows += 1;
                continue;
            }
            Err(_) => {
                debug!(row = row_no, "Mark is not numeric, dropping row");
                rejected_rows += 1;
                continue;
            }
        };

        let gender = gender_idx
            .map(|i| field(i))
            .filter(|g| !g.is_empty())
            .map(|g| g.to_string());
        let attendance = attendance_idx.and_then(|i| field(i).parse::<f64>().ok());

        records.push(Record {
            name: name.to_string(),
            roll_no: roll_no.to_string(),
            gender,
            subject: subject.to_string(),
            mark,
            attendance,
        });
    }

    if records.is_empty() {
        return Err(AnalyzeError::EmptyDataset("load"));
    }

    info!(
        records = records.len(),
        rejected_rows, "Dataset cleaned and validated"
    );

    Ok(LoadOutcome {
        records,
        rejected_rows,
    })
}
