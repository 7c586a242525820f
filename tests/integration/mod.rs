//! Integration tests for the moodle tools

mod branch_table;
mod compare_cli;
mod reconcile_files;
mod test_utils;

pub use test_utils::{write_lines, with_config_home};
