//! JSON output formatting

use crate::merge::MergeReport;

/// Format the summary as JSON
pub fn format(report: &MergeReport) -> String {
    serde_json::to_string_pretty(report)
        .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize report: {}"}}"#, e))
}
