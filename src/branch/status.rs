//! Branch status run: list branches, fetch issues, render the table.

use crate::branch::columns::Column;
use crate::branch::git::list_branches;
use crate::branch::table::{build_status_table, StatusTable, TableOptions};
use crate::branch::tracker::{HttpTrackerClient, TrackerClient};
use crate::error::ToolError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Environment variable naming the Moodle checkout.
pub const MOODLE_DIR_ENV: &str = "MOODLE_DIR";

/// Everything a branch status run needs.
#[derive(Debug, Clone)]
pub struct BranchStatusOptions {
    pub repo_dir: PathBuf,
    pub columns: Vec<Column>,
    pub max_width: Option<usize>,
    pub date_format: String,
    pub tracker_url: String,
    pub timeout: Duration,
}

impl BranchStatusOptions {
    fn table_options(&self) -> TableOptions {
        TableOptions {
            columns: self.columns.clone(),
            max_width: self.max_width,
            date_format: self.date_format.clone(),
        }
    }
}

/// `0` means "no truncation".
pub fn max_width_from(value: usize) -> Option<usize> {
    if value == 0 {
        None
    } else {
        Some(value)
    }
}

/// Resolve the repository directory.
///
/// An explicit directory wins (relative paths are taken from `cwd`), then
/// `$MOODLE_DIR`, then `cwd` itself.
pub fn resolve_repo_dir(
    explicit: Option<&Path>,
    moodle_dir_env: Option<&str>,
    cwd: &Path,
) -> Result<PathBuf, ToolError> {
    if let Some(dir) = explicit {
        let resolved = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            cwd.join(dir)
        };
        if !resolved.is_dir() {
            return Err(ToolError::Config(format!(
                "Directory {} does not exist",
                dir.display()
            )));
        }
        return Ok(resolved);
    }

    match moodle_dir_env {
        Some(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
        _ => Ok(cwd.to_path_buf()),
    }
}

/// Build the status table for the branches in `options.repo_dir`.
pub async fn collect_branch_status(
    options: &BranchStatusOptions,
    client: &dyn TrackerClient,
) -> Result<StatusTable, ToolError> {
    let branches = list_branches(&options.repo_dir)?;
    if branches.is_empty() {
        return Err(ToolError::Git("No branches found".to_string()));
    }
    info!(
        repo = %options.repo_dir.display(),
        branches = branches.len(),
        "Branches listed"
    );
    Ok(build_status_table(&branches, &options.table_options(), client).await)
}

/// Run against the HTTP tracker and return the rendered table.
pub fn run_branch_status(options: &BranchStatusOptions) -> Result<String, ToolError> {
    let client = HttpTrackerClient::new(options.tracker_url.clone(), options.timeout)?;
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ToolError::Tracker(format!("Failed to create runtime: {}", e)))?;
    let table = rt.block_on(collect_branch_status(options, &client))?;
    Ok(table.render())
}
