//! Configuration System
//!
//! Layered configuration for both tools: built-in defaults, an optional TOML
//! file and `MOODLE_TOOLS__*` environment variables. Command-line flags are
//! applied on top by the CLI layer.

use crate::branch::columns::{select_columns, Column, DEFAULT_COLUMNS};
use crate::branch::dates::{validate_date_format, DEFAULT_DATE_FORMAT};
use crate::branch::tracker::DEFAULT_TRACKER_URL;
use crate::logging::{validate_logging_config, LoggingConfig};
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Branch status reporter settings
    #[serde(default)]
    pub brstatus: BranchStatusConfig,

    /// Moodledata reconciliation settings
    #[serde(default)]
    pub compare: CompareConfig,
}

/// Settings for `brstatus`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchStatusConfig {
    /// Column names, in display order
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,

    /// Maximum cell width in characters, 0 for no limit
    #[serde(default = "default_max_width")]
    pub max_width: usize,

    /// chrono strftime pattern for date columns
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Base URL of the issue tracker
    #[serde(default = "default_tracker_url")]
    pub tracker_url: String,

    /// Per-request timeout for tracker lookups
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_columns() -> Vec<String> {
    DEFAULT_COLUMNS.iter().map(|c| c.as_str().to_string()).collect()
}

fn default_max_width() -> usize {
    45
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_tracker_url() -> String {
    DEFAULT_TRACKER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for BranchStatusConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            max_width: default_max_width(),
            date_format: default_date_format(),
            tracker_url: default_tracker_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BranchStatusConfig {
    /// Configured columns, normalised like a `-c` argument.
    pub fn parsed_columns(&self) -> Result<Vec<Column>, String> {
        select_columns(&self.columns).map_err(|e| e.to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        self.parsed_columns()?;
        validate_date_format(&self.date_format).map_err(|e| e.to_string())?;
        if !(self.tracker_url.starts_with("http://") || self.tracker_url.starts_with("https://")) {
            return Err(format!(
                "tracker_url must start with http:// or https:// (got '{}')",
                self.tracker_url
            ));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Settings for `moodledata-compare`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Append the file name to "missing from directory" lines
    #[serde(default = "default_true")]
    pub show_file_name: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            show_file_name: default_true(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Logging(String),
    BranchStatus(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Logging(msg) => write!(f, "logging: {}", msg),
            ValidationError::BranchStatus(msg) => write!(f, "brstatus: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ToolsConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = validate_logging_config(&self.logging) {
            errors.push(ValidationError::Logging(e));
        }
        if let Err(e) = self.brstatus.validate() {
            errors.push(ValidationError::BranchStatus(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
