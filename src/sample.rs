//! Sample dataset generation for demos and end-to-end tests.

use std::path::Path;

use anyhow::{Result, bail};
use csv::WriterBuilder;
use tracing::info;

/// Four students across Math/Physics/Chemistry. The `Semester` column is
/// deliberately present even though the loader ignores it: extra columns
/// must not break a load.
const SAMPLE_ROWS: &[(&str, &str, &str, &str, u32, u32, u32)] = &[
    ("Aman Kumar", "23BCA001", "M", "Math", 78, 92, 1),
    ("Aman Kumar", "23BCA001", "M", "Physics", 72, 92, 1),
    ("Aman Kumar", "23BCA001", "M", "Chemistry", 81, 92, 1),
    ("Nisha Sharma", "23BCA002", "F", "Math", 88, 95, 1),
    ("Nisha Sharma", "23BCA002", "F", "Physics", 91, 95, 1),
    ("Nisha Sharma", "23BCA002", "F", "Chemistry", 85, 95, 1),
    ("Ravi Verma", "23BCA003", "M", "Math", 54, 68, 1),
    ("Ravi Verma", "23BCA003", "M", "Physics", 47, 68, 1),
    ("Ravi Verma", "23BCA003", "M", "Chemistry", 50, 68, 1),
    ("Priya Singh", "23BCA004", "F", "Math", 96, 98, 1),
    ("Priya Singh", "23BCA004", "F", "Physics", 94, 98, 1),
    ("Priya Singh", "23BCA004", "F", "Chemistry", 97, 98, 1),
];

/// Writes the sample dataset to `path`. Refuses to overwrite an existing
/// file unless `force` is set.
pub fn write_sample(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record([
        "Name",
        "Roll_No",
        "Gender",
        "Subject",
        "Marks",
        "Attendance",
        "Semester",
    ])?;
    for &(name, roll_no, gender, subject, marks, attendance, semester) in SAMPLE_ROWS {
        let marks = marks.to_string();
        let attendance = attendance.to_string();
        let semester = semester.to_string();
        writer.write_record([
            name,
            roll_no,
            gender,
            subject,
            marks.as_str(),
            attendance.as_str(),
            semester.as_str(),
        ])?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = SAMPLE_ROWS.len(), "Sample dataset created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_write_sample_creates_twelve_rows() {
        let path = env::temp_dir().join("student_analyzer_test_sample.csv");
        let _ = fs::remove_file(&path);

        write_sample(&path, false).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        // 1 header + 12 data rows
        assert_eq!(content.lines().count(), 13);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_sample_refuses_overwrite_without_force() {
        let path = env::temp_dir().join("student_analyzer_test_sample_force.csv");
        fs::write(&path, "existing").unwrap();

        assert!(write_sample(&path, false).is_err());
        assert!(write_sample(&path, true).is_ok());

        fs::remove_file(&path).unwrap();
    }
}
