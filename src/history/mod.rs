//! # History Lookup
//!
//! Finds when a file first entered version control.
//!
//! Lookups go through the [`HistorySource`] trait so the pipeline can run
//! against [`GitHistory`] in production and a canned source in tests.
//!
//! The creation date is the *last* timestamp of a newest-first log. That
//! is only correct when the log is complete: in a shallow clone the oldest
//! reachable commit is not the real creation commit.
//! [`GitHistory::is_shallow`] lets callers warn about this.

mod git;

use std::path::Path;

use chrono::{DateTime, NaiveDate};

pub use git::{GitHistory, RepositoryError};

/// Source of change timestamps for a file
pub trait HistorySource {
    /// Returns the file's change timestamps, newest first.
    ///
    /// `None` means the history could not be obtained at all.
    fn timestamps(&self, path: &Path) -> Option<Vec<String>>;

    /// Returns the calendar date the file was first recorded
    fn creation_date(&self, path: &Path) -> Option<NaiveDate> {
        earliest_date(self.timestamps(path)?.as_slice())
    }
}

/// Reduces a newest-first list of ISO-8601 timestamps to the date of the
/// oldest one.
///
/// The time of day is dropped; the date is taken in the timestamp's own
/// offset. Returns `None` for an empty list or an unparseable entry.
pub fn earliest_date<S: AsRef<str>>(timestamps: &[S]) -> Option<NaiveDate> {
    let oldest = timestamps
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .last()?;

    parse_timestamp(oldest).map(|dt| dt.date_naive())
}

/// Parses an ISO-8601 timestamp with offset, accepting a `Z` suffix
fn parse_timestamp(raw: &str) -> Option<DateTime<chrono::FixedOffset>> {
    let normalized = match raw.strip_suffix('Z') {
        Some(stem) => format!("{stem}+00:00"),
        None => raw.to_string(),
    };

    DateTime::parse_from_rfc3339(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct CannedHistory(HashMap<PathBuf, Vec<String>>);

    impl HistorySource for CannedHistory {
        fn timestamps(&self, path: &Path) -> Option<Vec<String>> {
            self.0.get(path).cloned()
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn oldest_entry_wins() {
        let log = ["2024-03-05T10:00:00+00:00", "2023-01-10T08:30:00Z"];
        assert_eq!(earliest_date(&log), Some(date("2023-01-10")));
    }

    #[test]
    fn date_taken_in_own_offset() {
        // 23:30 at -05:00 is already the next day in UTC
        let log = ["2022-06-01T23:30:00-05:00"];
        assert_eq!(earliest_date(&log), Some(date("2022-06-01")));
    }

    #[test]
    fn trailing_blank_lines_ignored() {
        let log = ["2024-03-05T10:00:00+01:00", "2021-12-31T00:00:00+01:00", "", "  "];
        assert_eq!(earliest_date(&log), Some(date("2021-12-31")));
    }

    #[test]
    fn empty_history_has_no_date() {
        let log: [&str; 0] = [];
        assert_eq!(earliest_date(&log), None);
    }

    #[test]
    fn unparseable_timestamp_has_no_date() {
        assert_eq!(earliest_date(&["2024-03-05T10:00:00+00:00", "yesterday"]), None);
    }

    #[test]
    fn creation_date_uses_source() {
        let path = PathBuf::from("notes/post.md");
        let source = CannedHistory(HashMap::from([(
            path.clone(),
            vec![
                "2024-03-05T10:00:00+00:00".to_string(),
                "2023-01-10T08:30:00Z".to_string(),
            ],
        )]));

        assert_eq!(source.creation_date(&path), Some(date("2023-01-10")));
        assert_eq!(source.creation_date(Path::new("missing.md")), None);
    }
}
