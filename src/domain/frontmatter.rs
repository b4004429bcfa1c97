//! Frontmatter parsing and rendering
//!
//! A document may begin with a YAML block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Hello
//! draft: false
//! ---
//! Body text, preserved byte-for-byte.
//! ```
//!
//! Documents without a complete block are treated as having no metadata;
//! their whole text is the body.

use std::sync::OnceLock;

use regex::Regex;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Delimiter line that opens and closes a frontmatter block
pub const MARKER: &str = "---";

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("Malformed frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Frontmatter is not a key/value mapping")]
    NotAMapping,
}

/// A markdown document split into metadata and body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Parsed frontmatter, `None` when the document has no block
    pub metadata: Option<Mapping>,

    /// Everything after the closing marker line (or the whole text)
    pub body: String,
}

fn closing_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // A line holding only the marker, terminated by a newline or end of text
    RE.get_or_init(|| Regex::new(r"\n---(?:\r?\n|\z)").expect("closing marker pattern is valid"))
}

/// Length of the opening marker line, if the text starts with one
fn opening_marker_len(content: &str) -> Option<usize> {
    let rest = content.strip_prefix(MARKER)?;
    if rest.starts_with('\n') {
        Some(MARKER.len() + 1)
    } else if rest.starts_with("\r\n") {
        Some(MARKER.len() + 2)
    } else {
        None
    }
}

impl Document {
    /// Splits raw text into frontmatter and body.
    ///
    /// Only a malformed YAML block is an error. A missing opening or
    /// closing marker yields a document with no metadata.
    pub fn parse(content: &str) -> Result<Self, FrontmatterError> {
        let Some(start) = opening_marker_len(content) else {
            return Ok(Self::without_metadata(content));
        };

        // Search from the newline ending the opening line so an empty block matches
        let Some(end) = closing_marker().find_at(content, start - 1) else {
            return Ok(Self::without_metadata(content));
        };

        let yaml = if end.start() > start {
            &content[start..end.start()]
        } else {
            ""
        };

        let metadata = if yaml.trim().is_empty() {
            Mapping::new()
        } else {
            match serde_yaml::from_str::<Value>(yaml)? {
                Value::Mapping(map) => map,
                Value::Null => Mapping::new(),
                _ => return Err(FrontmatterError::NotAMapping),
            }
        };

        Ok(Self {
            metadata: Some(metadata),
            body: content[end.end()..].to_string(),
        })
    }

    fn without_metadata(content: &str) -> Self {
        Self {
            metadata: None,
            body: content.to_string(),
        }
    }

    /// Returns true if the document carried a frontmatter block
    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }

    /// Sets a string field, creating the frontmatter block if needed.
    ///
    /// Existing keys keep their position; new keys are appended.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) {
        self.metadata
            .get_or_insert_with(Mapping::new)
            .insert(Value::String(key.to_string()), Value::String(value.into()));
    }

    /// Looks up a frontmatter field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.metadata.as_ref()?.get(key)
    }

    /// Renders the document back to text.
    ///
    /// A document without metadata renders as its body alone.
    pub fn render(&self) -> Result<String, FrontmatterError> {
        let Some(metadata) = &self.metadata else {
            return Ok(self.body.clone());
        };

        let yaml = serde_yaml::to_string(metadata)?;

        let mut content = String::with_capacity(yaml.len() + self.body.len() + 8);
        content.push_str(MARKER);
        content.push('\n');
        content.push_str(yaml.trim_end());
        content.push('\n');
        content.push_str(MARKER);
        content.push('\n');
        content.push_str(&self.body);

        Ok(content)
    }
}
