use std::env;
use std::fs;
use std::path::PathBuf;

use student_analyzer::aggregate::aggregate;
use student_analyzer::grade::grade;
use student_analyzer::loader::load;
use student_analyzer::output::{render_report, write_summary_csv};
use student_analyzer::sample::write_sample;
use student_analyzer::stats::{class_average, rank, subject_stats, summary_table};

fn temp_path(name: &str) -> PathBuf {
    env::temp_dir().join(name)
}

#[test]
fn test_full_pipeline_on_sample_dataset() {
    let csv_path = temp_path("student_analyzer_it_sample.csv");
    let _ = fs::remove_file(&csv_path);
    write_sample(&csv_path, true).expect("failed to write sample");

    let outcome = load(&csv_path).expect("failed to load sample");
    assert_eq!(outcome.records.len(), 12);
    assert_eq!(outcome.rejected_rows, 0);

    let roster = aggregate(&outcome.records).expect("failed to aggregate");
    assert_eq!(roster.len(), 4);

    // Averages from the sample marks.
    let aman = roster.get("23BCA001").unwrap();
    assert!((aman.average().unwrap() - 77.0).abs() < 1e-9);
    let nisha = roster.get("23BCA002").unwrap();
    assert!((nisha.average().unwrap() - 88.0).abs() < 1e-9);
    let ravi = roster.get("23BCA003").unwrap();
    assert!((ravi.average().unwrap() - 151.0 / 3.0).abs() < 1e-9);
    assert_eq!(ravi.letter_grade().unwrap(), "D");
    let priya = roster.get("23BCA004").unwrap();
    assert!((priya.average().unwrap() - 287.0 / 3.0).abs() < 1e-9);

    let mut warnings = Vec::new();
    let rows = summary_table(&roster, &mut warnings);
    assert!(warnings.is_empty());
    let class_avg = class_average(&rows).unwrap();
    assert!((class_avg - 77.75).abs() < 0.01);

    let (top, bottom) = rank(&roster, 1, &mut warnings);
    assert_eq!(top[0].name, "Priya Singh");
    assert_eq!(bottom[0].name, "Ravi Verma");

    let stats = subject_stats(&outcome.records).unwrap();
    let subjects: Vec<&str> = stats.iter().map(|s| s.subject.as_str()).collect();
    assert_eq!(subjects, ["Math", "Physics", "Chemistry"]);
    // Math marks: 78, 88, 54, 96.
    assert!((stats[0].mean - 79.0).abs() < 1e-9);
    assert_eq!(stats[0].min, 54.0);
    assert_eq!(stats[0].max, 96.0);

    let report = render_report(roster.len(), class_avg, &top, &bottom).unwrap();
    assert!(report.starts_with("Performance Summary Report\n"));
    assert!(report.contains("Total Students: 4"));
    assert!(report.contains("Class Average: 77.75"));
    assert!(report.contains("- 23BCA004 | Priya Singh : 95.67"));
    assert!(report.contains("- 23BCA003 | Ravi Verma : 50.33"));

    fs::remove_file(&csv_path).unwrap();
}

#[test]
fn test_summary_export_round_trip() {
    let csv_path = temp_path("student_analyzer_it_roundtrip_in.csv");
    let summary_path = temp_path("student_analyzer_it_roundtrip_out.csv");
    let _ = fs::remove_file(&csv_path);
    let _ = fs::remove_file(&summary_path);
    write_sample(&csv_path, true).unwrap();

    let outcome = load(&csv_path).unwrap();
    let roster = aggregate(&outcome.records).unwrap();
    let mut warnings = Vec::new();
    let rows = summary_table(&roster, &mut warnings);
    write_summary_csv(&summary_path, roster.subjects(), &rows).unwrap();

    // Re-parse the exported table and reconstruct the derived columns from
    // the mark cells; they must match what was exported (average modulo the
    // 2-decimal rounding applied at export).
    let mut reader = csv::Reader::from_path(&summary_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let mark_cols: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with("Mark_"))
        .map(|(i, _)| i)
        .collect();
    let total_col = headers.iter().position(|h| h == "Total").unwrap();
    let average_col = headers.iter().position(|h| h == "Average").unwrap();
    let grade_col = headers.iter().position(|h| h == "Grade").unwrap();

    let mut row_count = 0;
    for result in reader.records() {
        let row = result.unwrap();
        let marks: Vec<f64> = mark_cols
            .iter()
            .filter_map(|&i| row.get(i))
            .filter(|cell| !cell.is_empty())
            .map(|cell| cell.parse::<f64>().unwrap())
            .collect();

        let total: f64 = marks.iter().sum();
        let average = total / marks.len() as f64;

        assert_eq!(row.get(total_col).unwrap().parse::<f64>().unwrap(), total);
        let exported_average = row.get(average_col).unwrap().parse::<f64>().unwrap();
        assert!((exported_average - average).abs() < 0.005);
        assert_eq!(row.get(grade_col).unwrap(), grade(average));
        row_count += 1;
    }
    assert_eq!(row_count, 4);

    fs::remove_file(&csv_path).unwrap();
    fs::remove_file(&summary_path).unwrap();
}

#[test]
fn test_duplicate_subject_entries_are_last_write_wins() {
    let csv_path = temp_path("student_analyzer_it_duplicates.csv");
    fs::write(
        &csv_path,
        "Name,Roll_No,Subject,Marks\n\
         Aman Kumar,23BCA001,Math,70\n\
         Aman Kumar,23BCA001,Math,80\n",
    )
    .unwrap();

    let outcome = load(&csv_path).unwrap();
    let roster = aggregate(&outcome.records).unwrap();
    assert_eq!(roster.get("23BCA001").unwrap().mark("Math"), Some(80.0));

    fs::remove_file(&csv_path).unwrap();
}
