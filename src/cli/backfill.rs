//! Backfill pipeline - adds published dates to eligible documents

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use super::output::Output;
use crate::domain::{Eligibility, MarkerKeys};
use crate::history::HistorySource;
use crate::storage::{read_document, write_document};

/// Settings for one backfill run
#[derive(Debug, Clone)]
pub struct Options {
    /// Report intended changes without writing
    pub dry_run: bool,

    /// Frontmatter keys for draft and published markers
    pub keys: MarkerKeys,
}

/// What happened to a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Date written to the file
    Published { date: String },

    /// Dry run: date would have been written
    WouldPublish { date: String },

    /// Not eligible (draft or already dated)
    Skipped { reason: Eligibility },

    /// Recoverable per-file error
    Failed { reason: String },
}

impl FileOutcome {
    /// Returns true if the file was (or would be) modified
    pub fn is_processed(&self) -> bool {
        matches!(self, FileOutcome::Published { .. } | FileOutcome::WouldPublish { .. })
    }
}

/// Per-file entry in the report
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,

    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Result of a backfill run
#[derive(Debug, Clone, Serialize)]
pub struct BackfillReport {
    pub dry_run: bool,
    pub files: Vec<FileReport>,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BackfillReport {
    fn new(dry_run: bool, files: Vec<FileReport>) -> Self {
        let processed = files.iter().filter(|f| f.outcome.is_processed()).count();
        let skipped = files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Skipped { .. }))
            .count();
        let failed = files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Failed { .. }))
            .count();

        Self {
            dry_run,
            files,
            processed,
            skipped,
            failed,
        }
    }

    /// Report for a run that found no files
    pub fn empty(dry_run: bool) -> Self {
        Self::new(dry_run, Vec::new())
    }
}

/// Processes a single file. Never fails: errors become [`FileOutcome::Failed`].
pub fn process_file<H: HistorySource + ?Sized>(
    path: &Path,
    options: &Options,
    history: &H,
) -> FileOutcome {
    match try_process_file(path, options, history) {
        Ok(outcome) => outcome,
        Err(e) => FileOutcome::Failed {
            reason: format!("{:#}", e),
        },
    }
}

fn try_process_file<H: HistorySource + ?Sized>(
    path: &Path,
    options: &Options,
    history: &H,
) -> Result<FileOutcome> {
    let mut document = read_document(path)?;

    let eligibility = Eligibility::of(document.metadata.as_ref(), &options.keys);
    if !eligibility.is_eligible() {
        tracing::debug!(path = %path.display(), reason = eligibility.reason(), "Skipping");
        return Ok(FileOutcome::Skipped { reason: eligibility });
    }

    let Some(created) = history.creation_date(path) else {
        return Ok(FileOutcome::Failed {
            reason: "could not get git creation date".to_string(),
        });
    };
    let date = created.format("%Y-%m-%d").to_string();

    if options.dry_run {
        return Ok(FileOutcome::WouldPublish { date });
    }

    document.set_field(&options.keys.published, date.as_str());
    write_document(path, &document)?;

    Ok(FileOutcome::Published { date })
}

/// Processes every file in order, reporting one line per file
pub fn run<H: HistorySource + ?Sized>(
    files: &[PathBuf],
    options: &Options,
    history: &H,
    output: &Output,
) -> BackfillReport {
    let field = &options.keys.published;
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
        let outcome = process_file(path, options, history);
        let shown = path.display();

        match &outcome {
            FileOutcome::Published { date } => {
                output.line(&format!("Added '{}: {}' to {}", field, date, shown));
            }
            FileOutcome::WouldPublish { date } => {
                output.line(&format!("Would add '{}: {}' to {}", field, date, shown));
            }
            FileOutcome::Skipped { reason } => {
                output.line(&format!("Skipping {} ({})", shown, reason.reason()));
            }
            FileOutcome::Failed { reason } => {
                output.warning(&format!("Skipping {}: {}", shown, reason));
            }
        }

        reports.push(FileReport {
            path: path.clone(),
            outcome,
        });
    }

    BackfillReport::new(options.dry_run, reports)
}
