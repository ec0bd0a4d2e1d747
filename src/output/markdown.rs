//! Markdown report generation
//!
//! This module writes an analysis report as a markdown document, for keeping
//! alongside the exported data.

use crate::analysis::Report;
use crate::storage::{replace_file, StorageResult};
use std::path::Path;

/// Writes a markdown report to `output_path`
///
/// # Arguments
///
/// * `report` - The analysis to render
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(StorageError)` - Failed to write the file
pub fn generate_markdown_report(report: &Report, output_path: &Path) -> StorageResult<()> {
    let markdown = format_markdown_report(report);
    replace_file(output_path, markdown.as_bytes())
}

/// Formats an analysis report as markdown
pub fn format_markdown_report(report: &Report) -> String {
    let mut md = String::new();

    md.push_str("# Quote Analysis\n\n");

    md.push_str("## Overview\n\n");
    md.push_str(&format!("- **Total Quotes**: {}\n", report.total_quotes));
    md.push_str(&format!(
        "- **Unique Authors**: {}\n",
        report.unique_authors()
    ));
    md.push_str(&format!(
        "- **Most Quoted Author**: {} ({} quotes)\n",
        report.most_quoted_author.0, report.most_quoted_author.1
    ));
    md.push_str(&format!("- **Total Tags**: {}\n", report.total_tags));
    md.push_str(&format!("- **Unique Tags**: {}\n", report.unique_tags()));
    if let Some((tag, count)) = &report.most_common_tag {
        md.push_str(&format!(
            "- **Most Common Tag**: {} ({} times)\n",
            tag, count
        ));
    }
    md.push('\n');

    md.push_str("## Quote Length\n\n");
    md.push_str("| Measure | Characters |\n");
    md.push_str("|---------|------------|\n");
    md.push_str(&format!("| Shortest | {} |\n", report.lengths.shortest));
    md.push_str(&format!("| Longest | {} |\n", report.lengths.longest));
    md.push_str(&format!("| Average | {:.1} |\n\n", report.lengths.average));

    md.push_str("## Top Authors\n\n");
    md.push_str("| Rank | Author | Quotes |\n");
    md.push_str("|------|--------|--------|\n");
    for (i, (author, count)) in report.top_authors.iter().enumerate() {
        md.push_str(&format!("| {} | {} | {} |\n", i + 1, escape_cell(author), count));
    }
    md.push('\n');

    if !report.top_tags.is_empty() {
        md.push_str("## Top Tags\n\n");
        md.push_str("| Rank | Tag | Uses |\n");
        md.push_str("|------|-----|------|\n");
        for (i, (tag, count)) in report.top_tags.iter().enumerate() {
            md.push_str(&format!("| {} | {} | {} |\n", i + 1, escape_cell(tag), count));
        }
        md.push('\n');
    }

    md
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
