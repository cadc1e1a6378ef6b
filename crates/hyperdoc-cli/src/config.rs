//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML, JSON or TOML)
//! - The `HYPERDOC_CONFIG` environment variable (through `--config`)

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::logging::LogFormat;
use hyperdoc_core::{BuilderConfig, CyclePolicy, StatusCodes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template used by `generate` when `--template` is not given
    pub template: Option<PathBuf>,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingSection,

    /// Schema resolution settings
    pub resolution: ResolutionConfig,

    /// Response status per HTTP method, on top of the defaults
    pub status_codes: BTreeMap<String, u16>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (trace, debug, info, warn, error) or a filter directive
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<LogFormat>,
}

/// Resolution configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// What to do with a schema that references itself
    pub cycle_policy: CyclePolicy,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
        }
    }
}

/// Supported configuration file formats, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFileFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFileFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::parse_content(&content, ConfigFileFormat::from_path(path))?;
        config.validate()?;

        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    fn parse_content(content: &str, format: ConfigFileFormat) -> Result<Self> {
        Ok(match format {
            ConfigFileFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFileFormat::Json => serde_json::from_str(content)?,
            ConfigFileFormat::Toml => toml::from_str(content)?,
        })
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Ignoring unreadable configuration");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".hyperdoc.yaml"),
            PathBuf::from(".hyperdoc.json"),
            PathBuf::from(".hyperdoc.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let hyperdoc_dir = config_dir.join("hyperdoc");
            paths.push(hyperdoc_dir.join("config.yaml"));
            paths.push(hyperdoc_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".hyperdoc.yaml"));
        }

        paths
    }

    fn validate(&self) -> Result<()> {
        if let Some((method, _)) = self
            .status_codes
            .iter()
            .find(|(method, code)| method.is_empty() || **code > 599)
        {
            return Err(Error::config(format!(
                "invalid status code override for method '{}'",
                method
            )));
        }
        Ok(())
    }

    /// Builder settings derived from this configuration
    pub fn builder_config(&self) -> BuilderConfig {
        let status_codes = self
            .status_codes
            .iter()
            .fold(StatusCodes::default(), |codes, (method, code)| {
                codes.with_override(method, *code)
            });

        BuilderConfig {
            cycle_policy: self.resolution.cycle_policy,
            status_codes,
        }
    }
}
