//! Output formatting

pub mod human;
pub mod json;

use crate::merge::MergeReport;

/// Output format for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Format a merge summary for output
pub fn format_report(report: &MergeReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => human::format(report),
        OutputFormat::Json => json::format(report),
    }
}
