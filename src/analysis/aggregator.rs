//! Dataset aggregation and statistics.
//!
//! This module computes summary statistics over a loaded dataset.
//! Everything here is pure: no I/O and no shared state.

use crate::models::{ExerciseFrequency, LoadedDataset, SummaryStats};
use std::collections::{HashMap, HashSet};

/// Compute the headline statistics of a dataset.
pub fn summarize(dataset: &LoadedDataset) -> SummaryStats {
    let mut max_attempts: u32 = 0;
    let mut exercise_ids = HashSet::new();

    for record in dataset {
        max_attempts = max_attempts.max(record.attempts);
        exercise_ids.extend(record.exercise_ids.iter().copied());
    }

    SummaryStats {
        max_attempts,
        distinct_exercise_count: exercise_ids.len(),
    }
}

/// Count how many records list each exercise.
///
/// An id repeated within one record counts once for that record. Sorted by
/// student count (highest first), ties broken by exercise id.
pub fn exercise_frequency(dataset: &LoadedDataset) -> Vec<ExerciseFrequency> {
    let mut counts: HashMap<i64, usize> = HashMap::new();

    for record in dataset.iter() {
        let unique: HashSet<i64> = record.exercise_ids.iter().copied().collect();
        for id in unique {
            *counts.entry(id).or_default() += 1;
        }
    }

    let mut frequencies: Vec<ExerciseFrequency> = counts
        .into_iter()
        .map(|(exercise_id, students)| ExerciseFrequency {
            exercise_id,
            students,
        })
        .collect();

    frequencies.sort_by(|a, b| {
        b.students
            .cmp(&a.students)
            .then_with(|| a.exercise_id.cmp(&b.exercise_id))
    });

    frequencies
}

/// The `n` most frequently attempted exercises.
pub fn top_exercises(dataset: &LoadedDataset, n: usize) -> Vec<ExerciseFrequency> {
    let mut frequencies = exercise_frequency(dataset);
    frequencies.truncate(n);
    frequencies
}
