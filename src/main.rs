//! AttemptStats - student exercise-attempt summarizer
//!
//! Loads a file of three-line student records, keeps students who made
//! enough attempts, and reports the highest attempt count together with
//! the number of distinct exercises attempted.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (invalid arguments, config, unreadable or malformed input)

mod analysis;
mod cli;
mod config;
mod error;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::{Config, DEFAULT_CONFIG_FILE};
use loader::LoaderOptions;
use models::{Report, ReportMetadata};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    debug!("AttemptStats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        error!("Failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .attemptstats.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml()?;
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("Created {} with default settings.", DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging. `RUST_LOG` wins when set, otherwise the verbosity
/// flags pick the level. Logs go to stderr.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(args.log_level()).into())
    });

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load, aggregate, and write the report.
fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args)?;
    config.merge_with_args(args);

    let report = build_report(&args.input, &config)?;
    let output = report::render(&report, config.report.format)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Run the loader and aggregator over `input`.
fn build_report(input: &Path, config: &Config) -> Result<Report> {
    let options = LoaderOptions::from(&config.loader);

    let dataset = loader::load_dataset(input, &options)
        .with_context(|| format!("Failed to load records from {}", input.display()))?;

    info!(
        "Loaded {} students with at least {} attempts",
        dataset.len(),
        options.min_attempts
    );
    if dataset.is_empty() {
        warn!("No students met the attempts threshold");
    }

    let summary = analysis::summarize(&dataset);
    debug!("Summary: {:?}", summary);

    Ok(Report {
        metadata: ReportMetadata {
            input_path: input.display().to_string(),
            generated_at: Utc::now(),
            records_loaded: dataset.len(),
            min_attempts: options.min_attempts,
        },
        summary,
        top_exercises: analysis::top_exercises(&dataset, config.report.top_exercises),
    })
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
