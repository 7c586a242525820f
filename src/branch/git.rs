//! Local branch listing via the `git` command line.

use crate::error::ToolError;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Prefix `git branch` puts in front of the checked out branch.
const CURRENT_BRANCH_MARKER: &str = "* ";

/// Run `git branch` in `repo_dir` and return the branch names.
pub fn list_branches(repo_dir: &Path) -> Result<Vec<String>, ToolError> {
    let output = Command::new("git")
        .arg("branch")
        .current_dir(repo_dir)
        .output()
        .map_err(|e| {
            ToolError::Git(format!(
                "Could not run git in {}: {}",
                repo_dir.display(),
                e
            ))
        })?;

    if !output.status.success() {
        debug!(
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "git branch failed"
        );
        return Err(ToolError::Git(format!(
            "Could not fetch git branches. Is the working dir {} correct?",
            repo_dir.display()
        )));
    }

    Ok(parse_branch_output(&String::from_utf8_lossy(&output.stdout)))
}

/// Branch names from `git branch` output, current branch marker removed.
pub fn parse_branch_output(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.strip_prefix(CURRENT_BRANCH_MARKER)
                .unwrap_or(line)
                .to_string()
        })
        .collect()
}
