//! Tracker issue numbers embedded in branch names.

use regex::Regex;
use std::sync::OnceLock;

/// Project key prefixed to every tracker issue number.
pub const ISSUE_PREFIX: &str = "MDL";

fn issue_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r"{}-(\d+)(?:\s|\b)", ISSUE_PREFIX))
            .expect("issue number pattern is valid")
    })
}

/// Extract the first `MDL-<n>` issue number from a branch name.
///
/// Returns `None` for branches that do not reference an issue, or whose number
/// does not fit in a `u64`.
pub fn extract_issue_number(branch: &str) -> Option<u64> {
    issue_pattern()
        .captures(branch)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// `MDL-<n>` key for an issue number.
pub fn issue_key(number: u64) -> String {
    format!("{}-{}", ISSUE_PREFIX, number)
}
