//! pubdate - backfill `published` dates into markdown frontmatter
//!
//! Walks a directory of markdown files and, for every document that is
//! neither a draft nor already dated, adds a `published` field holding the
//! date the file first appeared in git history.

pub mod domain;
pub mod history;
pub mod storage;
pub mod cli;

pub use domain::{is_eligible, Document, Eligibility};
pub use history::{GitHistory, HistorySource};
