//! Error types shared by the branch status reporter and the moodledata reconciler.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the command-line front ends.
///
/// Malformed input lines are not represented here: they are skipped by the
/// parsers and never abort a run.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Git error: {0}")]
    Git(String),

    #[error("Tracker error: {0}")]
    Tracker(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl ToolError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ToolError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for ToolError {
    fn from(err: config::ConfigError) -> Self {
        ToolError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Output(err.to_string())
    }
}
