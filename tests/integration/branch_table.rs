//! Branch status table against an in-memory tracker

use async_trait::async_trait;
use moodle_tools::branch::{build_status_table, Column, TableOptions, TrackerClient};
use moodle_tools::error::ToolError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned XML and counts lookups per issue.
struct FakeTracker {
    issues: HashMap<u64, String>,
    failing: Vec<u64>,
    calls: Mutex<HashMap<u64, usize>>,
}

impl FakeTracker {
    fn new() -> Self {
        Self {
            issues: HashMap::new(),
            failing: Vec::new(),
            calls: Mutex::new(HashMap::new()),
        }
    }

    fn with_issue(mut self, number: u64, title: &str, status: &str, assignee: &str) -> Self {
        self.issues.insert(number, issue_xml(number, title, status, assignee));
        self
    }

    fn calls(&self, number: u64) -> usize {
        self.calls.lock().unwrap().get(&number).copied().unwrap_or(0)
    }
}

#[async_trait]
impl TrackerClient for FakeTracker {
    async fn fetch_issue_xml(&self, number: u64) -> Result<Option<String>, ToolError> {
        *self.calls.lock().unwrap().entry(number).or_insert(0) += 1;
        if self.failing.contains(&number) {
            return Err(ToolError::Tracker("connection reset".to_string()));
        }
        Ok(self.issues.get(&number).cloned())
    }
}

fn issue_xml(number: u64, title: &str, status: &str, assignee: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="0.92">
  <channel>
    <item>
      <title>[MDL-{number}] {title}</title>
      <key id="1">MDL-{number}</key>
      <type id="1">Bug</type>
      <priority id="3">Minor</priority>
      <status id="5">{status}</status>
      <resolution id="1">Fixed</resolution>
      <assignee username="a">{assignee}</assignee>
      <reporter username="r">Rick Roe</reporter>
      <created>Tue, 17 Jan 2023 00:53:02 +0800</created>
      <updated>Wed, 1 Feb 2023 09:10:11 +0000</updated>
      <resolved>Thu, 2 Feb 2023 10:00:00 +0000</resolved>
    </item>
  </channel>
</rss>"#
    )
}

fn options(columns: Vec<Column>, max_width: Option<usize>) -> TableOptions {
    TableOptions {
        columns,
        max_width,
        date_format: "%Y-%m-%d".to_string(),
    }
}

fn branches(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_table_rows_for_each_branch_kind() {
    let tracker = FakeTracker::new().with_issue(100, "Fix quiz", "Closed", "Jane Doe");
    let table = build_status_table(
        &branches(&["main", "MDL-100-master", "MDL-200-fix"]),
        &options(vec![Column::Branch, Column::Status, Column::Assignee], None),
        &tracker,
    )
    .await;

    assert_eq!(
        table.render(),
        "branch         status        assignee\n\
         main           other\n\
         MDL-100-master Closed        Jane Doe\n\
         MDL-200-fix    no data found"
    );
}

#[tokio::test]
async fn test_each_issue_is_fetched_once() {
    let tracker = FakeTracker::new().with_issue(100, "Fix quiz", "Closed", "Jane Doe");
    let table = build_status_table(
        &branches(&["MDL-100-master", "MDL-100-MOODLE_401_STABLE", "MDL-100-tidy"]),
        &options(vec![Column::Branch, Column::Mdl], None),
        &tracker,
    )
    .await;

    assert_eq!(tracker.calls(100), 1);
    assert!(table.rows().iter().all(|row| row[1] == "100"));
}

#[tokio::test]
async fn test_underscore_after_number_is_not_an_issue() {
    let tracker = FakeTracker::new().with_issue(100, "Fix quiz", "Closed", "Jane Doe");
    let table = build_status_table(
        &branches(&["MDL-100_tidy", "MDL-100-tidy"]),
        &options(vec![Column::Branch, Column::Mdl], None),
        &tracker,
    )
    .await;

    assert_eq!(table.rows()[0], vec!["MDL-100_tidy", "other"]);
    assert_eq!(table.rows()[1], vec!["MDL-100-tidy", "100"]);
    assert_eq!(tracker.calls(100), 1);
}

#[tokio::test]
async fn test_label_follows_column_order() {
    let tracker = FakeTracker::new();
    let table = build_status_table(
        &branches(&["main", "MDL-200-fix"]),
        &options(vec![Column::Title, Column::Status, Column::Branch], None),
        &tracker,
    )
    .await;

    assert_eq!(table.rows()[0], vec!["", "other", "main"]);
    assert_eq!(table.rows()[1], vec!["", "no data found", "MDL-200-fix"]);
}

#[tokio::test]
async fn test_tracker_failure_is_not_fatal() {
    let mut tracker = FakeTracker::new().with_issue(100, "Fix quiz", "Closed", "Jane Doe");
    tracker.failing.push(300);
    let table = build_status_table(
        &branches(&["MDL-300-broken", "MDL-100-ok"]),
        &options(vec![Column::Branch, Column::Status], None),
        &tracker,
    )
    .await;

    assert_eq!(table.rows()[0], vec!["MDL-300-broken", "no data found"]);
    assert_eq!(table.rows()[1], vec!["MDL-100-ok", "Closed"]);
}

#[tokio::test]
async fn test_truncation_spares_branch_column() {
    let tracker = FakeTracker::new().with_issue(
        100,
        "A rather long issue title that will not fit",
        "Closed",
        "Jane Doe",
    );
    let table = build_status_table(
        &branches(&["MDL-100-a-very-long-branch-name"]),
        &options(vec![Column::Branch, Column::Title], Some(10)),
        &tracker,
    )
    .await;

    assert_eq!(
        table.rows()[0],
        vec!["MDL-100-a-very-long-branch-name", "A rather \u{2026}"]
    );
}

#[tokio::test]
async fn test_dates_and_ids_are_formatted() {
    let tracker = FakeTracker::new().with_issue(100, "Fix", "Closed", "Jane Doe");
    let table = build_status_table(
        &branches(&["MDL-100-x"]),
        &options(
            vec![
                Column::Branch,
                Column::Created,
                Column::Resolved,
                Column::StatusId,
                Column::Title,
            ],
            None,
        ),
        &tracker,
    )
    .await;

    assert_eq!(
        table.rows()[0],
        vec!["MDL-100-x", "2023-01-17", "2023-02-02", "5", "Fix"]
    );
}
