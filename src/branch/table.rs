//! Branch status table: one row per branch, padded plain-text columns.

use crate::branch::columns::Column;
use crate::branch::issue::extract_issue_number;
use crate::branch::tracker::{parse_issue_xml, IssueInfo, TrackerClient};
use comfy_table::{presets, ContentArrangement, Table};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Cell text for branches that do not reference an issue.
pub const OTHER_LABEL: &str = "other";

/// Cell text for issues the tracker returned nothing usable for.
pub const NO_DATA_LABEL: &str = "no data found";

/// Appended to truncated cells.
pub const ELLIPSIS: char = '\u{2026}';

/// Layout options for [`build_status_table`].
#[derive(Debug, Clone)]
pub struct TableOptions {
    pub columns: Vec<Column>,
    /// Maximum cell width in characters; `None` disables truncation.
    pub max_width: Option<usize>,
    /// chrono `strftime` pattern for date columns.
    pub date_format: String,
}

/// Status table ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTable {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl StatusTable {
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Body rows, cells in column order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Header plus rows, left aligned and separated by one space, without
    /// borders or trailing spaces.
    pub fn render(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(self.columns.iter().map(|c| c.as_str()).collect::<Vec<_>>());
        for row in &self.rows {
            table.add_row(row.iter().map(String::as_str).collect::<Vec<_>>());
        }
        for column in table.column_iter_mut() {
            column.set_padding((0, 1));
        }
        table.trim_fmt()
    }
}

/// Cut `value` to `max_width` characters, the last being an ellipsis.
pub fn truncate_cell(value: &str, max_width: Option<usize>) -> String {
    match max_width {
        Some(max) if value.chars().count() > max => {
            let mut out: String = value.chars().take(max.saturating_sub(1)).collect();
            out.push(ELLIPSIS);
            out
        }
        _ => value.to_string(),
    }
}

/// Build the table, fetching each referenced issue once.
///
/// Tracker failures never abort the table; the affected rows show
/// [`NO_DATA_LABEL`].
pub async fn build_status_table(
    branches: &[String],
    options: &TableOptions,
    client: &dyn TrackerClient,
) -> StatusTable {
    let columns = options.columns.clone();
    let other_column = label_column(&columns);
    let mut issues: HashMap<u64, Option<IssueInfo>> = HashMap::new();
    let mut rows = Vec::with_capacity(branches.len());

    for branch in branches {
        let Some(number) = extract_issue_number(branch) else {
            rows.push(label_row(&columns, branch, other_column, OTHER_LABEL));
            continue;
        };

        if !issues.contains_key(&number) {
            let info = fetch_issue(client, number, &options.date_format).await;
            issues.insert(number, info);
        }

        match issues.get(&number).and_then(|info| info.as_ref()) {
            Some(info) => rows.push(issue_row(&columns, branch, info, options.max_width)),
            None => rows.push(label_row(&columns, branch, other_column, NO_DATA_LABEL)),
        }
    }

    StatusTable { columns, rows }
}

async fn fetch_issue(
    client: &dyn TrackerClient,
    number: u64,
    date_format: &str,
) -> Option<IssueInfo> {
    match client.fetch_issue_xml(number).await {
        Ok(Some(xml)) => {
            let info = parse_issue_xml(number, &xml, date_format);
            if info.is_none() {
                debug!(issue = number, "Tracker response had no issue item");
            }
            info
        }
        Ok(None) => {
            debug!(issue = number, "Issue not found on tracker");
            None
        }
        Err(e) => {
            warn!(issue = number, error = %e, "Could not fetch tracker issue");
            None
        }
    }
}

/// Column that carries the `other` / `no data found` label: the second
/// column, or the first when the second is the branch.
fn label_column(columns: &[Column]) -> Option<usize> {
    match columns.get(1) {
        Some(Column::Branch) => Some(0),
        Some(_) => Some(1),
        None => None,
    }
}

fn label_row(
    columns: &[Column],
    branch: &str,
    other_column: Option<usize>,
    label: &str,
) -> Vec<String> {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            if *column == Column::Branch {
                branch.to_string()
            } else if Some(i) == other_column {
                label.to_string()
            } else {
                String::new()
            }
        })
        .collect()
}

fn issue_row(
    columns: &[Column],
    branch: &str,
    info: &IssueInfo,
    max_width: Option<usize>,
) -> Vec<String> {
    columns
        .iter()
        .map(|column| match column {
            Column::Branch => branch.to_string(),
            other => truncate_cell(&info.value(*other), max_width),
        })
        .collect()
}
