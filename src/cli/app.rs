//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::backfill::{self, BackfillReport, Options};
use super::output::{Output, OutputFormat};
use crate::history::{GitHistory, HistorySource};
use crate::storage::{find_files, validate_root, Config};

#[derive(Parser, Debug)]
#[command(name = "pubdate")]
#[command(author, version, about = "Add 'published' dates to markdown frontmatter from git history")]
pub struct Cli {
    /// Directory containing markdown files to process
    pub directory: PathBuf,

    /// Show what would be done without making changes
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// File extension to scan (default: md)
    #[arg(long, value_name = "EXT")]
    pub ext: Option<String>,

    /// Frontmatter key to add (default: published)
    #[arg(long, value_name = "KEY")]
    pub field: Option<String>,

    /// Output format
    #[arg(long, short = 'f', env = "PUBDATE_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    execute(&cli, &GitHistory::new())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "pubdate=debug" } else { "pubdate=warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PUBDATE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Validates the target, loads configuration and runs the backfill.
///
/// Startup problems are returned as errors; per-file problems only show
/// up in the report.
pub fn execute<H: HistorySource + ?Sized>(cli: &Cli, history: &H) -> Result<()> {
    let directory = &cli.directory;

    validate_root(directory)?;
    GitHistory::ensure_repository(directory)?;

    if GitHistory::is_shallow(directory) {
        tracing::warn!(
            "{} is in a shallow clone; creation dates may be too recent",
            directory.display()
        );
    }

    let config = Config::for_directory(directory)?;
    let output = Output::new(cli.format.unwrap_or(config.global.default_format));

    let mut project = config.project;
    if let Some(ext) = &cli.ext {
        project.extension = ext.clone();
    }
    if let Some(field) = &cli.field {
        project.field = field.clone();
    }
    project.validate()?;

    let options = Options {
        dry_run: cli.dry_run,
        keys: project.marker_keys(),
    };
    tracing::debug!(?options, extension = %project.extension, "Starting backfill");

    let extension = project.extension.trim_start_matches('.');
    let files = find_files(directory, extension)?;

    if files.is_empty() {
        output.line(&format!("No .{} files found in {}", extension, directory.display()));
        output.data(&BackfillReport::empty(cli.dry_run));
        return Ok(());
    }

    output.line(&format!("Found {} .{} files", files.len(), extension));

    let report = backfill::run(&files, &options, history, &output);
    print_summary(&output, &report);

    Ok(())
}

fn print_summary(output: &Output, report: &BackfillReport) {
    if output.is_json() {
        output.data(report);
        return;
    }

    let action = if report.dry_run { "Would process" } else { "Processed" };
    output.blank();
    output.line(&format!("{} {} files", action, report.processed));
    output.line(&format!("Skipped {} files, {} failed", report.skipped, report.failed));
}
