//! Error taxonomy for the analysis pipeline.
//!
//! Structural failures get their own variant so callers can branch on kind;
//! row-level dirt is never an error, it is dropped and counted by the loader.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The input table lacks one or more required columns. Fatal: no partial load.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A stage that needs at least one row/record/student got none.
    #[error("{0}: dataset is empty")]
    EmptyDataset(&'static str),

    /// A student with no recorded marks has no average. Distinct from an
    /// average of zero, which is a valid value.
    #[error("student {0} has no marks, average is undefined")]
    UndefinedAverage(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
