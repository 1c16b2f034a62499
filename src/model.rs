//! Data types used by the analysis pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AnalyzeError;
use crate::grade::grade;

/// One validated (student, subject, mark) observation.
///
/// Built only by the loader; everything downstream operates on these typed
/// records, never on raw tabular cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Roll_No")]
    pub roll_no: String,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Marks")]
    pub mark: f64,
    #[serde(rename = "Attendance")]
    pub attendance: Option<f64>,
}

/// Aggregated profile of one student identity holding all subject marks.
///
/// Created when the aggregator first sees a roll number, mutated only by
/// [`Student::add_mark`], and treated as immutable once aggregation for a
/// run completes.
#[derive(Debug, Clone)]
pub struct Student {
    pub name: String,
    pub roll_no: String,
    pub gender: Option<String>,
    marks: HashMap<String, f64>,
}

impl Student {
    pub fn new(name: &str, roll_no: &str, gender: Option<&str>) -> Self {
        Student {
            name: name.to_string(),
            roll_no: roll_no.to_string(),
            gender: gender.map(|g| g.to_string()),
            marks: HashMap::new(),
        }
    }

    /// Sets the mark for a subject. A repeated subject overwrites the
    /// earlier value (last-write-wins), matching the source data policy.
    pub fn add_mark(&mut self, subject: &str, mark: f64) {
        self.marks.insert(subject.to_string(), mark);
    }

    pub fn mark(&self, subject: &str) -> Option<f64> {
        self.marks.get(subject).copied()
    }

    pub fn subject_count(&self) -> usize {
        self.marks.len()
    }

    /// Sum of all mark values; 0.0 for a student with no marks.
    pub fn total(&self) -> f64 {
        self.marks.values().sum()
    }

    /// Mean mark across subjects.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::UndefinedAverage`] if the student has no
    /// marks. An empty average is not an average of zero.
    pub fn average(&self) -> Result<f64, AnalyzeError> {
        if self.marks.is_empty() {
            return Err(AnalyzeError::UndefinedAverage(self.roll_no.clone()));
        }
        Ok(self.total() / self.marks.len() as f64)
    }

    /// Letter grade derived from the average via the fixed threshold table.
    pub fn letter_grade(&self) -> Result<String, AnalyzeError> {
        Ok(grade(self.average()?))
    }
}

/// The aggregated student collection for one run.
///
/// Iteration order of [`Roster::students`] is the first-appearance order of
/// each roll number in the input sequence, and [`Roster::subjects`] is the
/// first-appearance order of each subject. Both are load-bearing: they drive
/// report ordering and summary column order.
#[derive(Debug, Default)]
pub struct Roster {
    students: Vec<Student>,
    index: HashMap<String, usize>,
    subjects: Vec<String>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn get(&self, roll_no: &str) -> Option<&Student> {
        self.index.get(roll_no).map(|&i| &self.students[i])
    }

    /// Returns the student for `roll_no`, creating it on first sight.
    /// The gender recorded at creation wins; later values are ignored.
    pub(crate) fn entry(&mut self, roll_no: &str, name: &str, gender: Option<&str>) -> &mut Student {
        let idx = match self.index.get(roll_no).copied() {
            Some(i) => i,
            None => {
                self.students.push(Student::new(name, roll_no, gender));
                let i = self.students.len() - 1;
                self.index.insert(roll_no.to_string(), i);
                i
            }
        };
        &mut self.students[idx]
    }

    pub(crate) fn note_subject(&mut self, subject: &str) {
        if !self.subjects.iter().any(|s| s == subject) {
            self.subjects.push(subject.to_string());
        }
    }
}

/// Descriptive statistics for one subject across the whole record set.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectStats {
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Mean")]
    pub mean: f64,
    #[serde(rename = "Min")]
    pub min: f64,
    #[serde(rename = "Max")]
    pub max: f64,
    #[serde(rename = "StdDev")]
    pub stddev: f64,
}

/// Flattened, export-ready view of one student.
///
/// `marks` is aligned with the roster's subject order; `None` cells export
/// as empty (the student never sat that subject).
#[derive(Debug, Clone)]
pub struct SummaryRow {
    pub roll_no: String,
    pub name: String,
    pub gender: Option<String>,
    pub marks: Vec<Option<f64>>,
    pub total: f64,
    pub average: f64,
    pub grade: String,
}
