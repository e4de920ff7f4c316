//! Loader for three-line student attempt records.
//!
//! An input file is a sequence of record groups, each exactly three lines:
//!
//! ```text
//! 5            <- attempts
//! 1,2,3        <- exercise ids
//! 10,20,30     <- responses
//! ```
//!
//! Groups whose attempt count is below the configured threshold are
//! dropped without error.

use crate::error::{LoadError, RecordField};
use crate::models::{LoadedDataset, StudentRecord};
use std::num::ParseIntError;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Lines per record group.
const GROUP_LINES: usize = 3;

/// Options controlling how records are loaded.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Records with fewer attempts than this are discarded.
    pub min_attempts: u32,
    /// Reject records whose id and response lists differ in length.
    pub require_aligned: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            min_attempts: 3,
            require_aligned: true,
        }
    }
}

impl From<&crate::config::LoaderConfig> for LoaderOptions {
    fn from(config: &crate::config::LoaderConfig) -> Self {
        Self {
            min_attempts: config.min_attempts,
            require_aligned: config.require_aligned,
        }
    }
}

/// Read `path` and parse it into a dataset.
pub fn load_dataset(path: &Path, options: &LoaderOptions) -> Result<LoadedDataset, LoadError> {
    debug!("Reading records from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_dataset(&content, options)
}

/// Parse file content into a dataset.
pub fn parse_dataset(content: &str, options: &LoaderOptions) -> Result<LoadedDataset, LoadError> {
    // `lines` drops only the final terminator; any blank line still counts
    let lines: Vec<&str> = content.lines().collect();

    debug!("Parsing {} lines", lines.len());

    let mut records = Vec::new();

    for (index, group) in lines.chunks(GROUP_LINES).enumerate() {
        let first_line = index * GROUP_LINES + 1;

        let &[attempts_line, ids_line, responses_line] = group else {
            return Err(LoadError::Format {
                line: first_line,
                reason: format!(
                    "incomplete record group: expected {} lines, found {}",
                    GROUP_LINES,
                    group.len()
                ),
            });
        };

        let record = parse_group(first_line, attempts_line, ids_line, responses_line)?;

        if options.require_aligned && !record.is_aligned() {
            return Err(LoadError::Format {
                line: first_line + 2,
                reason: format!(
                    "{} responses for {} exercise ids",
                    record.responses.len(),
                    record.exercise_ids.len()
                ),
            });
        }

        if record.attempts >= options.min_attempts {
            records.push(record);
        }
    }

    Ok(LoadedDataset::new(records))
}

/// Parse one group starting at 1-based line `first_line`.
fn parse_group(
    first_line: usize,
    attempts_line: &str,
    ids_line: &str,
    responses_line: &str,
) -> Result<StudentRecord, LoadError> {
    let attempts = parse_int(attempts_line, first_line, RecordField::Attempts)?;
    let exercise_ids = parse_list(ids_line, first_line + 1, RecordField::ExerciseIds)?;
    let responses = parse_list(responses_line, first_line + 2, RecordField::Responses)?;

    Ok(StudentRecord::new(attempts, exercise_ids, responses))
}

fn parse_list(text: &str, line: usize, field: RecordField) -> Result<Vec<i64>, LoadError> {
    text.trim()
        .split(',')
        .map(|item| parse_int(item, line, field))
        .collect()
}

fn parse_int<T>(text: &str, line: usize, field: RecordField) -> Result<T, LoadError>
where
    T: FromStr<Err = ParseIntError>,
{
    let value = text.trim();
    value.parse::<T>().map_err(|source| LoadError::Parse {
        line,
        field,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(content: &str) -> Result<LoadedDataset, LoadError> {
        parse_dataset(content, &LoaderOptions::default())
    }

    #[test]
    fn test_single_qualifying_group() {
        let dataset = parse("5\n1,2,3\n10,20,30\n").unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(
            dataset.records[0],
            StudentRecord::new(5, vec![1, 2, 3], vec![10, 20, 30])
        );
    }

    #[test]
    fn test_below_threshold_is_dropped() {
        let dataset = parse("2\n1,2\n0,1\n3\n4\n1\n").unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].attempts, 3);
        assert_eq!(dataset.records[0].exercise_ids, vec![4]);
    }

    #[test]
    fn test_only_records_meeting_threshold() {
        let content = "0\n1\n1\n1\n2\n2\n3\n3\n3\n9\n4\n4\n2\n5\n5\n";
        let dataset = parse(content).unwrap();

        assert!(dataset.iter().all(|r| r.attempts >= 3));
        let attempts: Vec<u32> = dataset.iter().map(|r| r.attempts).collect();
        assert_eq!(attempts, vec![3, 9]);
    }

    #[test]
    fn test_custom_threshold() {
        let options = LoaderOptions {
            min_attempts: 0,
            ..LoaderOptions::default()
        };
        let dataset = parse_dataset("0\n1\n1\n2\n2\n2\n", &options).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let dataset = parse(" 4 \r\n 1, 2 ,3\r\n7,8,9  \r\n").unwrap();

        assert_eq!(dataset.records[0].attempts, 4);
        assert_eq!(dataset.records[0].exercise_ids, vec![1, 2, 3]);
        assert_eq!(dataset.records[0].responses, vec![7, 8, 9]);
    }

    #[test]
    fn test_missing_trailing_newline() {
        let dataset = parse("3\n1\n1").unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_extra_blank_line_is_incomplete_group() {
        let err = parse("3\n1\n1\n\n").unwrap_err();
        assert!(matches!(err, LoadError::Format { line: 4, .. }));
    }

    #[test]
    fn test_blank_trailing_lines_not_multiple_of_three() {
        let err = parse("5\n1,2,3\n10,20,30\n   \n\n").unwrap_err();

        match err {
            LoadError::Format { line, reason } => {
                assert_eq!(line, 4);
                assert!(reason.contains("found 2"));
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_responses_line_is_parse_error() {
        let err = parse("3\n1,2\n\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse {
                line: 3,
                field: RecordField::Responses,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_input() {
        let dataset = parse("").unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_non_integer_attempts() {
        let err = parse("five\n1,2\n3,4\n").unwrap_err();

        match err {
            LoadError::Parse {
                line, field, value, ..
            } => {
                assert_eq!(line, 1);
                assert_eq!(field, RecordField::Attempts);
                assert_eq!(value, "five");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_attempts_rejected() {
        let err = parse("-1\n1\n1\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_bad_response_reports_its_line() {
        let err = parse("3\n1\n1\n4\n1,2\n1,x\n").unwrap_err();

        match err {
            LoadError::Parse {
                line, field, value, ..
            } => {
                assert_eq!(line, 6);
                assert_eq!(field, RecordField::Responses);
                assert_eq!(value, "x");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_list_line_is_parse_error() {
        let err = parse("3\n\n1\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse {
                line: 2,
                field: RecordField::ExerciseIds,
                ..
            }
        ));
    }

    #[test]
    fn test_incomplete_trailing_group() {
        let err = parse("3\n1\n1\n4\n1,2\n").unwrap_err();

        match err {
            LoadError::Format { line, reason } => {
                assert_eq!(line, 4);
                assert!(reason.contains("found 2"));
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_misaligned_lists_rejected_by_default() {
        let err = parse("3\n1,2,3\n1,2\n").unwrap_err();
        assert!(matches!(err, LoadError::Format { line: 3, .. }));
    }

    #[test]
    fn test_misaligned_lists_allowed_when_relaxed() {
        let options = LoaderOptions {
            require_aligned: false,
            ..LoaderOptions::default()
        };
        let dataset = parse_dataset("3\n1,2,3\n1,2\n", &options).unwrap();
        assert!(!dataset.records[0].is_aligned());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "5\n1,2,3\n10,20,30\n1\n9\n9\n").unwrap();

        let dataset = load_dataset(file.path(), &LoaderOptions::default()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].attempts, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");

        let err = load_dataset(&path, &LoaderOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_load_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/exercises.csv");
        let dataset = load_dataset(&path, &LoaderOptions::default()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert!(dataset.iter().all(|r| r.attempts >= 3 && r.is_aligned()));
    }
}
