//! Presentation: report formatters for `moodledata-compare`.

use crate::error::ToolError;
use crate::reconcile::ReconcileReport;

/// Header of the section listing export rows without a file.
pub const MISSING_FROM_DIRECTORY_HEADER: &str = "Files in DB but not in moodle-data";

/// Header of the section listing files without an export row.
pub const MISSING_FROM_DB_HEADER: &str = "Files in moodle-data but not in DB";

/// Two-section text report, each section preceded by an empty line.
pub fn format_compare_text(report: &ReconcileReport, show_name: bool) -> String {
    let mut lines = Vec::with_capacity(
        report.missing_from_directory.len() + report.missing_from_db.len() + 4,
    );
    lines.push(String::new());
    lines.push(MISSING_FROM_DIRECTORY_HEADER.to_string());
    lines.extend(report.missing_from_directory_lines(show_name));
    lines.push(String::new());
    lines.push(MISSING_FROM_DB_HEADER.to_string());
    lines.extend(report.missing_from_db_lines());
    lines.join("\n")
}

/// Full report as pretty-printed JSON, including row details and counters.
pub fn format_compare_json(report: &ReconcileReport) -> Result<String, ToolError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Format by name (`text` or `json`).
pub fn format_compare_report(
    report: &ReconcileReport,
    format: &str,
    show_name: bool,
) -> Result<String, ToolError> {
    match format {
        "text" => Ok(format_compare_text(report, show_name)),
        "json" => format_compare_json(report),
        other => Err(ToolError::Config(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}
