//! Data models for attempt statistics.
//!
//! This module contains the records produced by the loader and the
//! summary structures built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One student's exercise session, built from a three-line group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Number of attempts the student made.
    pub attempts: u32,
    /// Exercises attempted, in file order.
    pub exercise_ids: Vec<i64>,
    /// Responses, positionally aligned with `exercise_ids`.
    pub responses: Vec<i64>,
}

impl StudentRecord {
    /// Creates a new record.
    pub fn new(attempts: u32, exercise_ids: Vec<i64>, responses: Vec<i64>) -> Self {
        Self {
            attempts,
            exercise_ids,
            responses,
        }
    }

    /// Returns true when there is exactly one response per exercise id.
    pub fn is_aligned(&self) -> bool {
        self.exercise_ids.len() == self.responses.len()
    }
}

/// Records that passed the attempts filter, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedDataset {
    pub records: Vec<StudentRecord>,
}

impl LoadedDataset {
    pub fn new(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudentRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a LoadedDataset {
    type Item = &'a StudentRecord;
    type IntoIter = std::slice::Iter<'a, StudentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// The two headline statistics of a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Highest attempt count, 0 for an empty dataset.
    pub max_attempts: u32,
    /// Number of unique exercise ids across all records.
    pub distinct_exercise_count: usize,
}

/// How many students attempted a given exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseFrequency {
    pub exercise_id: i64,
    /// Records listing this exercise at least once.
    pub students: usize,
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Input file the dataset was loaded from.
    pub input_path: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of records that passed the attempts filter.
    pub records_loaded: usize,
    /// Attempts threshold in effect.
    pub min_attempts: u32,
}

/// The complete statistics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: SummaryStats,
    /// Most frequently attempted exercises.
    pub top_exercises: Vec<ExerciseFrequency>,
}
