//! Domain models for pubdate
//!
//! Frontmatter handling and eligibility rules, without any I/O concerns.

mod eligibility;
mod frontmatter;

pub use eligibility::{is_eligible, Eligibility, MarkerKeys};
pub use frontmatter::{Document, FrontmatterError, MARKER};
