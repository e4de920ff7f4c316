//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.attemptstats.toml` files.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".attemptstats.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Loader settings.
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Record loading settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Students with fewer attempts are left out of the dataset.
    #[serde(default = "default_min_attempts")]
    pub min_attempts: u32,

    /// Reject records whose id and response lists differ in length.
    #[serde(default = "default_true")]
    pub require_aligned: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            min_attempts: default_min_attempts(),
            require_aligned: true,
        }
    }
}

fn default_min_attempts() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Most-attempted exercises listed in json/markdown reports.
    #[serde(default = "default_top_exercises")]
    pub top_exercises: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            top_exercises: default_top_exercises(),
        }
    }
}

fn default_top_exercises() -> usize {
    5
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.attemptstats.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only when explicitly given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(min_attempts) = args.min_attempts {
            self.loader.min_attempts = min_attempts;
        }
        if args.allow_misaligned {
            self.loader.require_aligned = false;
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(top) = args.top {
            self.report.top_exercises = top;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize default config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.loader.min_attempts, 3);
        assert!(config.loader.require_aligned);
        assert_eq!(config.report.format, OutputFormat::Text);
        assert_eq!(config.report.top_exercises, 5);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[loader]
min_attempts = 1
require_aligned = false

[report]
format = "markdown"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.loader.min_attempts, 1);
        assert!(!config.loader.require_aligned);
        assert_eq!(config.report.format, OutputFormat::Markdown);
        assert_eq!(config.report.top_exercises, 5);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.loader.min_attempts, 3);
        assert_eq!(config.report.format, OutputFormat::Text);
    }

    #[test]
    fn test_merge_only_explicit_args() {
        let mut config: Config = toml::from_str("[loader]\nmin_attempts = 7\n").unwrap();
        let args = Args::try_parse_from(["attemptstats", "--format", "json"]).unwrap();

        config.merge_with_args(&args);

        assert_eq!(config.loader.min_attempts, 7);
        assert!(config.loader.require_aligned);
        assert_eq!(config.report.format, OutputFormat::Json);
    }

    #[test]
    fn test_merge_overrides() {
        let mut config = Config::default();
        let args = Args::try_parse_from([
            "attemptstats",
            "--min-attempts",
            "0",
            "--allow-misaligned",
            "--top",
            "2",
        ])
        .unwrap();

        config.merge_with_args(&args);

        assert_eq!(config.loader.min_attempts, 0);
        assert!(!config.loader.require_aligned);
        assert_eq!(config.report.top_exercises, 2);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[report]\ntop_exercises = 9\n",
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.report.top_exercises, 9);
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[loader]\nmin_attempts = \"many\"\n").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml().unwrap();
        assert!(toml_str.contains("[loader]"));
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("format = \"text\""));

        let reparsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(reparsed.loader.min_attempts, 3);
    }
}
