//! Issue Tracker Client
//!
//! Fetches the XML issue view of a tracker issue and reduces it to the fields
//! shown in the branch status table.

use crate::branch::columns::Column;
use crate::branch::dates::format_tracker_date;
use crate::branch::issue::issue_key;
use crate::error::ToolError;
use async_trait::async_trait;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Public Moodle tracker.
pub const DEFAULT_TRACKER_URL: &str = "https://tracker.moodle.org";

const TRACKER_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fields of one tracker issue, dates already formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueInfo {
    pub number: u64,
    pub title: String,
    pub issue_type: String,
    pub type_id: i64,
    pub priority: String,
    pub priority_id: i64,
    pub status: String,
    pub status_id: i64,
    pub resolution: String,
    pub resolution_id: i64,
    pub created: String,
    pub updated: String,
    pub resolved: String,
    pub assignee: String,
    pub reporter: String,
}

impl IssueInfo {
    /// Cell text for a column. The branch column is not part of an issue.
    pub fn value(&self, column: Column) -> String {
        match column {
            Column::Branch => String::new(),
            Column::Mdl => self.number.to_string(),
            Column::Title => self.title.clone(),
            Column::Type => self.issue_type.clone(),
            Column::TypeId => self.type_id.to_string(),
            Column::Priority => self.priority.clone(),
            Column::PriorityId => self.priority_id.to_string(),
            Column::Status => self.status.clone(),
            Column::StatusId => self.status_id.to_string(),
            Column::Resolution => self.resolution.clone(),
            Column::ResolutionId => self.resolution_id.to_string(),
            Column::Created => self.created.clone(),
            Column::Updated => self.updated.clone(),
            Column::Resolved => self.resolved.clone(),
            Column::Assignee => self.assignee.clone(),
            Column::Reporter => self.reporter.clone(),
        }
    }
}

/// Source of raw issue XML.
#[async_trait]
pub trait TrackerClient: Send + Sync {
    /// Fetch the XML view of issue `MDL-<number>`; `Ok(None)` when the
    /// tracker does not know the issue.
    async fn fetch_issue_xml(&self, number: u64) -> Result<Option<String>, ToolError>;
}

/// XML issue view URL for an issue on the tracker at `base_url`.
pub fn issue_xml_url(base_url: &str, number: u64) -> String {
    let key = issue_key(number);
    format!(
        "{}/si/jira.issueviews:issue-xml/{key}/{key}.xml",
        base_url.trim_end_matches('/')
    )
}

fn map_http_error(error: reqwest::Error) -> ToolError {
    if error.is_timeout() {
        ToolError::Tracker(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ToolError::Tracker(format!("Connection error: {}", error))
    } else if let Some(status) = error.status() {
        ToolError::Tracker(format!("Request failed with status {}: {}", status, error))
    } else {
        ToolError::Tracker(format!("HTTP error: {}", error))
    }
}

/// reqwest-backed tracker client.
pub struct HttpTrackerClient {
    client: Client,
    base_url: String,
}

impl HttpTrackerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ToolError> {
        let client = Client::builder()
            .connect_timeout(TRACKER_CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()
            .map_err(|e| ToolError::Tracker(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl TrackerClient for HttpTrackerClient {
    async fn fetch_issue_xml(&self, number: u64) -> Result<Option<String>, ToolError> {
        let url = issue_xml_url(&self.base_url, number);
        debug!(%url, "Fetching tracker issue");

        let response = self.client.get(&url).send().await.map_err(map_http_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status().map_err(map_http_error)?;
        let body = response.text().await.map_err(map_http_error)?;
        Ok(Some(body))
    }
}

/// Which child of `rss/channel/item` text is currently collected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Type,
    Priority,
    Status,
    Resolution,
    Created,
    Updated,
    Resolved,
    Assignee,
    Reporter,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"type" => Some(Field::Type),
            b"priority" => Some(Field::Priority),
            b"status" => Some(Field::Status),
            b"resolution" => Some(Field::Resolution),
            b"created" => Some(Field::Created),
            b"updated" => Some(Field::Updated),
            b"resolved" => Some(Field::Resolved),
            b"assignee" => Some(Field::Assignee),
            b"reporter" => Some(Field::Reporter),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct RawIssue {
    title: String,
    issue_type: String,
    type_id: i64,
    priority: String,
    priority_id: i64,
    status: String,
    status_id: i64,
    resolution: String,
    resolution_id: i64,
    created: String,
    updated: String,
    resolved: String,
    assignee: String,
    reporter: String,
}

impl RawIssue {
    fn text_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Type => &mut self.issue_type,
            Field::Priority => &mut self.priority,
            Field::Status => &mut self.status,
            Field::Resolution => &mut self.resolution,
            Field::Created => &mut self.created,
            Field::Updated => &mut self.updated,
            Field::Resolved => &mut self.resolved,
            Field::Assignee => &mut self.assignee,
            Field::Reporter => &mut self.reporter,
        }
    }

    fn set_id(&mut self, field: Field, id: i64) {
        match field {
            Field::Type => self.type_id = id,
            Field::Priority => self.priority_id = id,
            Field::Status => self.status_id = id,
            Field::Resolution => self.resolution_id = id,
            _ => {}
        }
    }
}

fn id_attribute(e: &BytesStart) -> Option<i64> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"id")
        .and_then(|attr| {
            std::str::from_utf8(&attr.value)
                .ok()
                .and_then(|s| s.trim().parse().ok())
        })
}

/// Text after the `[MDL-n]` prefix of an item title.
fn strip_issue_key(title: &str) -> &str {
    match title.find(']') {
        Some(pos) => title[pos + 1..].trim(),
        None => title.trim(),
    }
}

/// Parse the XML issue view. Returns `None` for malformed documents or
/// documents without an `item`.
pub fn parse_issue_xml(number: u64, xml: &str, date_format: &str) -> Option<IssueInfo> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut raw = RawIssue::default();
    let mut current: Option<Field> = None;
    let mut seen_item = false;
    let mut item_done = false;

    // Depth of the children of rss/channel/item.
    const FIELD_DEPTH: usize = 3;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name().as_ref().to_vec();
                if path.len() == 2 && name == b"item" && !item_done {
                    seen_item = true;
                }
                if seen_item && !item_done && path.len() == FIELD_DEPTH {
                    current = Field::from_tag(&name);
                    if let (Some(field), Some(id)) = (current, id_attribute(&e)) {
                        raw.set_id(field, id);
                    }
                }
                path.push(name);
            }
            Ok(Event::Empty(e)) => {
                if seen_item && !item_done && path.len() == FIELD_DEPTH {
                    if let (Some(field), Some(id)) =
                        (Field::from_tag(e.name().as_ref()), id_attribute(&e))
                    {
                        raw.set_id(field, id);
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(field) = current {
                    raw.text_mut(field).push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(field) = current {
                    raw.text_mut(field).push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(field) = current {
                    let text = raw.text_mut(field);
                    if let Ok(Some(ch)) = e.resolve_char_ref() {
                        text.push(ch);
                    } else {
                        let entity = String::from_utf8_lossy(e.as_ref());
                        if let Some(resolved) = resolve_predefined_entity(&entity) {
                            text.push_str(resolved);
                        }
                    }
                }
            }
            Ok(Event::End(_)) => {
                path.pop();
                if path.len() == FIELD_DEPTH {
                    current = None;
                }
                if seen_item && path.len() == 2 {
                    item_done = true;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                debug!(issue = number, error = %e, "Tracker XML could not be parsed");
                return None;
            }
            _ => {}
        }
    }

    if !seen_item {
        return None;
    }

    Some(IssueInfo {
        number,
        title: strip_issue_key(&raw.title).to_string(),
        issue_type: raw.issue_type.trim().to_string(),
        type_id: raw.type_id,
        priority: raw.priority.trim().to_string(),
        priority_id: raw.priority_id,
        status: raw.status.trim().to_string(),
        status_id: raw.status_id,
        resolution: raw.resolution.trim().to_string(),
        resolution_id: raw.resolution_id,
        created: format_tracker_date(&raw.created, date_format),
        updated: format_tracker_date(&raw.updated, date_format),
        resolved: format_tracker_date(&raw.resolved, date_format),
        assignee: raw.assignee.trim().to_string(),
        reporter: raw.reporter.trim().to_string(),
    })
}
