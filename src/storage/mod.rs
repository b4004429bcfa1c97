//! # Storage Layer
//!
//! Filesystem access for pubdate.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Documents | Markdown + YAML frontmatter | anywhere under the target directory |
//! | Project config | TOML | `<target>/.pubdate.toml` |
//! | Global config | TOML | `~/.config/pubdate/config.toml` |
//!
//! Document writes are atomic (temp file + rename).
//!
//! ## Key Types
//!
//! - [`find_files`] - Recursive, sorted document discovery
//! - [`read_document`] / [`write_document`] - Document I/O
//! - [`Config`] - Project and global configuration

mod config;
mod discovery;
mod documents;

pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, PROJECT_CONFIG_FILE};
pub use discovery::{find_files, validate_root, DiscoveryError};
pub use documents::{read_document, write_document};
