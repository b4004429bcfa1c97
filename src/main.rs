//! pubdate - backfill published dates from git history

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = pubdate::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
