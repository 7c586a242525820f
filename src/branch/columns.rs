//! Table columns for the branch status report.

use crate::error::ToolError;
use std::fmt;
use std::str::FromStr;

/// A column of the status table. Names are the tracker field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Branch,
    Mdl,
    Title,
    Type,
    TypeId,
    Priority,
    PriorityId,
    Status,
    StatusId,
    Resolution,
    ResolutionId,
    Created,
    Updated,
    Resolved,
    Assignee,
    Reporter,
}

/// Columns shown when none are requested.
pub const DEFAULT_COLUMNS: &[Column] = &[
    Column::Branch,
    Column::Title,
    Column::Status,
    Column::Updated,
    Column::Resolved,
    Column::Assignee,
];

/// Columns shown for `-c ALL`.
pub const ALL_COLUMNS: &[Column] = &[
    Column::Branch,
    Column::Title,
    Column::Status,
    Column::StatusId,
    Column::Created,
    Column::Updated,
    Column::Resolved,
    Column::Assignee,
    Column::Reporter,
    Column::Resolution,
    Column::ResolutionId,
    Column::Priority,
    Column::PriorityId,
    Column::Type,
    Column::TypeId,
];

/// Keyword selecting [`ALL_COLUMNS`].
pub const ALL_KEYWORD: &str = "ALL";

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Branch => "branch",
            Column::Mdl => "mdl",
            Column::Title => "title",
            Column::Type => "type",
            Column::TypeId => "typeId",
            Column::Priority => "priority",
            Column::PriorityId => "priorityId",
            Column::Status => "status",
            Column::StatusId => "statusId",
            Column::Resolution => "resolution",
            Column::ResolutionId => "resolutionId",
            Column::Created => "created",
            Column::Updated => "updated",
            Column::Resolved => "resolved",
            Column::Assignee => "assignee",
            Column::Reporter => "reporter",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let column = match s {
            "branch" => Column::Branch,
            "mdl" => Column::Mdl,
            "title" => Column::Title,
            "type" => Column::Type,
            "typeId" => Column::TypeId,
            "priority" => Column::Priority,
            "priorityId" => Column::PriorityId,
            "status" => Column::Status,
            "statusId" => Column::StatusId,
            "resolution" => Column::Resolution,
            "resolutionId" => Column::ResolutionId,
            "created" => Column::Created,
            "updated" => Column::Updated,
            "resolved" => Column::Resolved,
            "assignee" => Column::Assignee,
            "reporter" => Column::Reporter,
            other => {
                return Err(ToolError::Config(format!("Unknown column name '{}'", other)));
            }
        };
        Ok(column)
    }
}

/// Parse a comma separated column list, or `ALL`.
///
/// Names are trimmed, empty names and repeats are dropped, and `branch` is
/// put first when the list does not contain it.
pub fn parse_columns(list: &str) -> Result<Vec<Column>, ToolError> {
    if list.trim().is_empty() {
        return Err(ToolError::Config(
            "Column list needs column names separated by \",\"".to_string(),
        ));
    }
    if list.trim() == ALL_KEYWORD {
        return Ok(ALL_COLUMNS.to_vec());
    }
    select_columns(list.split(','))
}

/// Same rules as [`parse_columns`] for an already split list.
pub fn select_columns<I, S>(names: I) -> Result<Vec<Column>, ToolError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut columns = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        let column: Column = name.parse()?;
        if !columns.contains(&column) {
            columns.push(column);
        }
    }
    if !columns.contains(&Column::Branch) {
        columns.insert(0, Column::Branch);
    }
    Ok(columns)
}
