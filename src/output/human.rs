//! Human-readable output formatting

use crate::merge::MergeReport;

/// Format the summary for a terminal
pub fn format(report: &MergeReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Merged RTL for {}\n", report.top_module));
    output.push_str(&format!("RTL root: {}\n", report.root.display()));
    output.push_str(&format!(
        "Top file: {} (found by {})\n",
        report.top_file,
        report.top_match.describe()
    ));
    output.push_str(&format!("Output:   {}\n", report.output.display()));
    output.push_str(&format!(
        "Headers (.svh) included: {}\n",
        report.header_count
    ));
    output.push_str(&format!("Files merged: {}\n", report.files_merged));

    if report.cycle_fallback {
        output.push_str(&format!(
            "Warning: dependency cycle; {} file(s) could not be ordered, modules emitted in path order\n",
            report.unordered_files.len()
        ));
        for file in &report.unordered_files {
            output.push_str(&format!("   {}\n", file));
        }
    }

    for dup in &report.duplicate_modules {
        output.push_str(&format!(
            "Warning: module {} declared in {} and {}; using {}\n",
            dup.module, dup.shadowed, dup.kept, dup.kept
        ));
    }

    output.push_str("Done.\n");
    output
}
