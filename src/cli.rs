//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// AttemptStats - summarize student exercise-attempt logs
///
/// Reads a file of three-line record groups (attempts, exercise ids,
/// responses), keeps students with enough attempts, and reports the
/// highest attempt count and the number of distinct exercises.
///
/// Examples:
///   attemptstats exercises.csv
///   attemptstats exercises.csv --format json --output stats.json
///   attemptstats exercises.csv --min-attempts 5 --format markdown
///   attemptstats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Attempts file to summarize
    #[arg(
        value_name = "FILE",
        default_value = "exercises.csv",
        env = "ATTEMPTSTATS_INPUT"
    )]
    pub input: PathBuf,

    /// Path to configuration file
    ///
    /// If not specified, looks for .attemptstats.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum attempts for a student to be included
    ///
    /// Overrides the config file. Default: 3.
    #[arg(long, value_name = "COUNT")]
    pub min_attempts: Option<u32>,

    /// Accept records whose exercise id and response counts differ
    #[arg(long)]
    pub allow_misaligned: bool,

    /// Output format (text, json, markdown)
    ///
    /// Overrides the config file. Default: text.
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of most-attempted exercises to list in json/markdown reports
    #[arg(long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .attemptstats.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Two plain lines: max attempts, distinct exercise count (default)
    #[default]
    Text,
    /// JSON format
    Json,
    /// Markdown format
    Markdown,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.top == Some(0) {
            return Err("--top must be at least 1".to_string());
        }

        if self.input.as_os_str().is_empty() {
            return Err("Input file path must not be empty".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
