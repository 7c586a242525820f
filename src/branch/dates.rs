//! Tracker timestamps.
//!
//! The tracker writes dates like `Tue, 17 Jan 2023 00:53:02 +0800`. They are
//! reformatted with a chrono `strftime` pattern and keep their original offset.

use crate::error::ToolError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset};
use std::fmt::Write;

/// Default output pattern for date columns.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Reject patterns chrono cannot render.
pub fn validate_date_format(format: &str) -> Result<(), ToolError> {
    if format.is_empty() {
        return Err(ToolError::Config("Date format needs a value".to_string()));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ToolError::Config(format!("Invalid date format '{}'", format)));
    }
    Ok(())
}

/// Parse a tracker timestamp; the weekday prefix is optional.
pub fn parse_tracker_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_str(value, "%d %b %Y %H:%M:%S %z"))
        .ok()
}

/// Reformat a tracker timestamp. Unparseable input gives an empty string.
pub fn format_tracker_date(value: &str, format: &str) -> String {
    let Some(date) = parse_tracker_date(value) else {
        return String::new();
    };
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        return String::new();
    }
    out
}
