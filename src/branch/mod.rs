//! Branch Status
//!
//! Lists the local branches of a Moodle checkout, looks up the tracker issue
//! each branch name refers to and lays the results out as a text table.

pub mod columns;
pub mod dates;
pub mod git;
pub mod issue;
pub mod status;
pub mod table;
pub mod tracker;

pub use columns::{parse_columns, Column, ALL_COLUMNS, DEFAULT_COLUMNS};
pub use issue::extract_issue_number;
pub use status::{run_branch_status, BranchStatusOptions};
pub use table::{build_status_table, StatusTable, TableOptions};
pub use tracker::{parse_issue_xml, HttpTrackerClient, IssueInfo, TrackerClient};
