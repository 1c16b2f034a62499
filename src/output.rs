//! Output formatting and persistence for analysis results.
//!
//! Writes the cleaned record set, the summary table, the subject statistics
//! table, and the narrative text report; also serializes a JSON run summary
//! for the log. All artifacts are write-only outputs — the pipeline never
//! reads them back.

use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::model::{Record, Student, SubjectStats, SummaryRow};

/// Writes the validated record set back out as a cleaned CSV.
pub fn write_cleaned_csv(path: &Path, records: &[Record]) -> Result<()> {
    debug!(path = %path.display(), rows = records.len(), "Writing cleaned CSV");
    let mut writer = WriterBuilder::new().from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the summary table with the exact export column order:
/// `Roll_No, Name, Gender, Mark_<Subject>..., Total, Average, Grade`.
///
/// Mark columns follow the first-appearance order of subjects; a student
/// missing a subject gets an empty cell. `Average` is rounded to two
/// decimal places here and only here — internal values keep full precision.
pub fn write_summary_csv(path: &Path, subjects: &[String], rows: &[SummaryRow]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing summary CSV");
    let mut writer = WriterBuilder::new().from_path(path)?;

    let mut header = vec!["Roll_No".to_string(), "Name".to_string(), "Gender".to_string()];
    header.extend(subjects.iter().map(|s| format!("Mark_{s}")));
    header.extend(["Total".to_string(), "Average".to_string(), "Grade".to_string()]);
    writer.write_record(&header)?;

    for row in rows {
        let mut cells = vec![
            row.roll_no.clone(),
            row.name.clone(),
            row.gender.clone().unwrap_or_default(),
        ];
        cells.extend(
            row.marks
                .iter()
                .map(|m| m.map(|v| v.to_string()).unwrap_or_default()),
        );
        cells.push(row.total.to_string());
        cells.push(format!("{:.2}", row.average));
        cells.push(row.grade.clone());
        writer.write_record(&cells)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the per-subject statistics table.
pub fn write_subject_stats_csv(path: &Path, stats: &[SubjectStats]) -> Result<()> {
    debug!(path = %path.display(), rows = stats.len(), "Writing subject stats CSV");
    let mut writer = WriterBuilder::new().from_path(path)?;
    for row in stats {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Builds the fixed-format narrative report.
///
/// Averages are recomputed from the ranked students; both lists are printed
/// in ranking order (descending by average).
pub fn render_report(
    total_students: usize,
    class_average: f64,
    top: &[Student],
    bottom: &[Student],
) -> Result<String> {
    let mut out = String::new();
    out.push_str("Performance Summary Report\n");
    out.push_str("============================\n");
    out.push_str(&format!("Total Students: {total_students}\n"));
    out.push_str(&format!("Class Average: {class_average:.2}\n\n"));

    out.push_str("Top Performers:\n");
    for student in top {
        out.push_str(&format!(
            "- {} | {} : {:.2}\n",
            student.roll_no,
            student.name,
            student.average()?
        ));
    }

    out.push_str("\nBottom Performers:\n");
    for student in bottom {
        out.push_str(&format!(
            "- {} | {} : {:.2}\n",
            student.roll_no,
            student.name,
            student.average()?
        ));
    }

    Ok(out)
}

/// Renders the report and writes it to `path`.
pub fn write_report(
    path: &Path,
    total_students: usize,
    class_average: f64,
    top: &[Student],
    bottom: &[Student],
) -> Result<()> {
    let report = render_report(total_students, class_average, top, bottom)?;
    fs::write(path, report)?;
    info!(path = %path.display(), "Report written");
    Ok(())
}

/// Machine-readable run summary, logged as JSON at the end of a pipeline run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub students: usize,
    pub records: usize,
    pub rejected_rows: usize,
    pub class_average: f64,
    pub warnings: Vec<String>,
}

/// Logs the run summary as pretty-printed JSON.
pub fn print_json(summary: &RunSummary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
