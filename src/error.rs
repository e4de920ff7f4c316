//! Errors raised while loading an attempts file.

use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Which line of a record group a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    /// First line: the attempt count.
    Attempts,
    /// Second line: comma-separated exercise ids.
    ExerciseIds,
    /// Third line: comma-separated responses.
    Responses,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordField::Attempts => write!(f, "attempts"),
            RecordField::ExerciseIds => write!(f, "exercise ids"),
            RecordField::Responses => write!(f, "responses"),
        }
    }
}

/// Failure loading a dataset. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file is missing or unreadable.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file does not follow the three-line group layout.
    #[error("line {line}: {reason}")]
    Format { line: usize, reason: String },

    /// A value that should be an integer is not.
    #[error("line {line}: invalid {field} value {value:?}")]
    Parse {
        line: usize,
        field: RecordField,
        value: String,
        #[source]
        source: ParseIntError,
    },
}
