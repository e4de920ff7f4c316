//! Report generation.
//!
//! Renders a [`Report`] as plain text, Markdown, or JSON. Rendering is
//! kept separate from the statistics themselves.

use crate::cli::OutputFormat;
use crate::models::{ExerciseFrequency, Report, ReportMetadata, SummaryStats};
use anyhow::Result;

/// Render a report in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => generate_text_report(&report.summary),
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Markdown => generate_markdown_report(report),
    })
}

/// Two lines: max attempts, then distinct exercise count.
pub fn generate_text_report(summary: &SummaryStats) -> String {
    format!(
        "{}\n{}\n",
        summary.max_attempts, summary.distinct_exercise_count
    )
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Attempt Statistics\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_summary_section(&report.summary));
    output.push_str(&generate_exercises_section(&report.top_exercises));

    output
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Input:** `{}`\n", metadata.input_path));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Students Included:** {}\n",
        metadata.records_loaded
    ));
    section.push_str(&format!(
        "- **Minimum Attempts:** {}\n",
        metadata.min_attempts
    ));
    section.push('\n');

    section
}

fn generate_summary_section(summary: &SummaryStats) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| Max Attempts | Distinct Exercises |\n");
    section.push_str("|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} |\n\n",
        summary.max_attempts, summary.distinct_exercise_count
    ));

    section
}

fn generate_exercises_section(exercises: &[ExerciseFrequency]) -> String {
    let mut section = String::new();

    section.push_str("## Most Attempted Exercises\n\n");

    if exercises.is_empty() {
        section.push_str("No students met the attempts threshold.\n");
        return section;
    }

    section.push_str("| Exercise | Students |\n");
    section.push_str("|:---|:---:|\n");
    for exercise in exercises {
        section.push_str(&format!(
            "| {} | {} |\n",
            exercise.exercise_id, exercise.students
        ));
    }

    section
}
