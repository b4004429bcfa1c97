//! # Command-Line Interface
//!
//! Argument parsing, the backfill pipeline and report formatting.
//!
//! ```bash
//! pubdate content/blog            # write dates
//! pubdate --dry-run content/blog  # report only
//! pubdate -f json content/blog    # machine-readable report
//! ```
//!
//! ## Output Formats
//!
//! - `text` (default) - One line per file plus a summary
//! - `json` - A single report object on stdout
//!
//! Diagnostics go to stderr through `tracing`; `--verbose` (or the
//! `PUBDATE_LOG` filter) turns on debug output.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the backfill.

mod app;
mod backfill;
mod output;

pub use app::{execute, run, Cli};
pub use backfill::{process_file, BackfillReport, FileOutcome, FileReport, Options};
pub use output::{Output, OutputFormat};
