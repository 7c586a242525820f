//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ToolError;

/// Map domain errors to the one-line message printed on stderr.
pub fn map_error(e: &ToolError) -> String {
    match e {
        ToolError::Config(msg) => format!("{}\nSee --help for more details", msg),
        other => other.to_string(),
    }
}
