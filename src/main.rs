//! CLI entry point for the student performance analyzer.
//!
//! Provides subcommands for running the full analysis pipeline, printing
//! the narrative report, inspecting subject statistics, and generating the
//! sample dataset.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use student_analyzer::aggregate::aggregate;
use student_analyzer::loader::{self, LoadOutcome};
use student_analyzer::model::Roster;
use student_analyzer::output::{
    RunSummary, print_json, render_report, write_cleaned_csv, write_report, write_subject_stats_csv,
    write_summary_csv,
};
use student_analyzer::sample::write_sample;
use student_analyzer::stats::{class_average, rank, subject_stats, summary_table};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "student_analyzer")]
#[command(about = "A tool to analyze student performance datasets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and export all artifacts
    Analyze {
        /// Path to the student marks CSV
        #[arg(value_name = "CSV")]
        input: PathBuf,

        /// Directory to write artifacts to
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Number of top/bottom performers to rank
        #[arg(short = 'n', long, default_value_t = 3)]
        top: usize,
    },
    /// Print the narrative performance report
    Report {
        /// Path to the student marks CSV
        #[arg(value_name = "CSV")]
        input: PathBuf,

        /// Number of top/bottom performers to list
        #[arg(short = 'n', long, default_value_t = 3)]
        top: usize,

        /// Optional file to write the report to instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print per-subject descriptive statistics
    SubjectStats {
        /// Path to the student marks CSV
        #[arg(value_name = "CSV")]
        input: PathBuf,
    },
    /// Write the sample dataset
    Seed {
        /// Where to write the sample CSV
        #[arg(short, long, default_value = "data/sample_student_scores.csv")]
        out: PathBuf,

        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/student_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("student_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output_dir,
            top,
        } => {
            let (outcome, roster) = load_and_aggregate(&input)?;
            let stats = subject_stats(&outcome.records)?;

            let mut warnings = Vec::new();
            let rows = summary_table(&roster, &mut warnings);
            let class_avg = class_average(&rows)?;
            let (top_list, bottom_list) = rank(&roster, top, &mut warnings);

            std::fs::create_dir_all(&output_dir)?;
            write_cleaned_csv(&output_dir.join("cleaned_student_data.csv"), &outcome.records)?;
            write_summary_csv(
                &output_dir.join("student_summary.csv"),
                roster.subjects(),
                &rows,
            )?;
            write_subject_stats_csv(&output_dir.join("subject_stats.csv"), &stats)?;
            write_report(
                &output_dir.join("performance_summary.txt"),
                roster.len(),
                class_avg,
                &top_list,
                &bottom_list,
            )?;

            print_json(&RunSummary {
                generated_at: Utc::now(),
                students: roster.len(),
                records: outcome.records.len(),
                rejected_rows: outcome.rejected_rows,
                class_average: class_avg,
                warnings,
            })?;
            info!(output_dir = %output_dir.display(), "All artifacts exported");
        }
        Commands::Report { input, top, out } => {
            let (_, roster) = load_and_aggregate(&input)?;

            let mut warnings = Vec::new();
            let rows = summary_table(&roster, &mut warnings);
            let class_avg = class_average(&rows)?;
            let (top_list, bottom_list) = rank(&roster, top, &mut warnings);

            let report = render_report(roster.len(), class_avg, &top_list, &bottom_list)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, report)?;
                    info!(path = %path.display(), "Report written");
                }
                None => print!("{report}"),
            }
        }
        Commands::SubjectStats { input } => {
            let outcome = loader::load(&input)?;
            for row in subject_stats(&outcome.records)? {
                println!(
                    "{}: mean={:.2} min={} max={} stddev={:.2}",
                    row.subject, row.mean, row.min, row.max, row.stddev
                );
            }
        }
        Commands::Seed { out, force } => {
            write_sample(&out, force)?;
            println!("Sample dataset written to {}.", out.display());
        }
    }

    Ok(())
}

/// Runs the front half of the pipeline: load, validate, aggregate.
fn load_and_aggregate(input: &Path) -> Result<(LoadOutcome, Roster)> {
    let outcome = loader::load(input)?;
    let roster = aggregate(&outcome.records)?;
    Ok((outcome, roster))
}
