//! Configuration handling for pubdate
//!
//! Configuration is read from `.pubdate.toml` in the target directory
//! (project) and `~/.config/pubdate/config.toml` (global). Both files are
//! optional; command-line flags take precedence over either.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::MarkerKeys;

/// Name of the per-directory configuration file
pub const PROJECT_CONFIG_FILE: &str = ".pubdate.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Per-directory configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Extension of files to scan, without the dot
    pub extension: String,

    /// Frontmatter key that receives the date
    pub field: String,

    /// Frontmatter key marking drafts
    pub draft_field: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        let keys = MarkerKeys::default();
        Self {
            extension: "md".to_string(),
            field: keys.published,
            draft_field: keys.draft,
        }
    }
}

impl ProjectConfig {
    /// Rejects values that cannot work as file extensions or YAML keys
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Invalid("extension must not be empty".to_string()));
        }
        if self.field.trim().is_empty() {
            return Err(ConfigError::Invalid("field must not be empty".to_string()));
        }
        if self.draft_field.trim().is_empty() {
            return Err(ConfigError::Invalid("draft_field must not be empty".to_string()));
        }
        Ok(())
    }

    /// Frontmatter keys used by the eligibility rules
    pub fn marker_keys(&self) -> MarkerKeys {
        MarkerKeys {
            draft: self.draft_field.clone(),
            published: self.field.clone(),
        }
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
}

impl Config {
    /// Loads configuration for a target directory
    pub fn for_directory(dir: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(dir)?;

        Ok(Self { project, global })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "pubdate", "pubdate").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads project configuration from a directory
    fn load_project_config(dir: &Path) -> Result<ProjectConfig> {
        let config_path = dir.join(PROJECT_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config
            .validate()
            .with_context(|| format!("Invalid project config: {}", config_path.display()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.project.extension, "md");
        assert_eq!(config.project.field, "published");
        assert_eq!(config.project.draft_field, "draft");
        assert_eq!(config.global.default_format, OutputFormat::Text);
    }

    #[test]
    fn parse_project_config() {
        let toml = r#"
extension = "mdx"
field = "date"
"#;

        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.extension, "mdx");
        assert_eq!(config.field, "date");
        assert_eq!(config.draft_field, "draft");
    }

    #[test]
    fn parse_global_config() {
        let config: GlobalConfig = toml::from_str("default_format = \"json\"\n").unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn missing_project_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_project_config(dir.path()).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn project_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "extension = \"markdown\"\ndraft_field = \"hidden\"\n",
        )
        .unwrap();

        let config = Config::load_project_config(dir.path()).unwrap();
        assert_eq!(config.extension, "markdown");
        assert_eq!(config.marker_keys().draft, "hidden");
        assert_eq!(config.marker_keys().published, "published");
    }

    #[test]
    fn malformed_project_file_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "extension = [").unwrap();

        let err = Config::load_project_config(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse project config"));
    }

    #[test]
    fn empty_field_is_invalid() {
        let config = ProjectConfig {
            field: "  ".to_string(),
            ..ProjectConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
