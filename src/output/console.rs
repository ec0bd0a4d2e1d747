//! Plain-text rendering for the terminal
//!
//! Each `format_*` function builds the text; the `print_*` wrappers write it
//! to stdout.

use crate::analysis::Report;
use crate::crawler::CrawlSummary;
use crate::record::{timestamp, Record};

/// Number of matches shown by [`format_search_results`]
pub const SEARCH_PREVIEW: usize = 5;

const RULE: &str = "============================================================";

fn heading(out: &mut String, title: &str) {
    out.push_str(RULE);
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
}

/// Formats the figures of a finished crawl
pub fn format_crawl_summary(summary: &CrawlSummary) -> String {
    let mut out = String::new();
    out.push_str("Scraping completed!\n");
    out.push_str(&format!(
        "  Total quotes collected: {}\n",
        summary.quotes_collected
    ));
    out.push_str(&format!("  Pages scraped: {}\n", summary.pages_visited));
    if summary.skipped_containers > 0 {
        out.push_str(&format!(
            "  Quotes skipped: {}\n",
            summary.skipped_containers
        ));
    }
    out.push_str(&format!("  Finished: {}\n", summary.stop));
    out
}

pub fn print_crawl_summary(summary: &CrawlSummary) {
    print!("{}", format_crawl_summary(summary));
}

/// Formats an analysis report
///
/// `None` renders the no-data message.
pub fn format_report(report: Option<&Report>) -> String {
    let Some(report) = report else {
        return "No quotes to analyze.\n".to_string();
    };

    let mut out = String::new();
    heading(&mut out, "QUOTE ANALYSIS");

    out.push_str(&format!("Total quotes: {}\n", report.total_quotes));
    out.push_str(&format!("Unique authors: {}\n", report.unique_authors()));
    out.push_str(&format!(
        "Most quoted author: {} ({} quotes)\n",
        report.most_quoted_author.0, report.most_quoted_author.1
    ));

    out.push_str(&format!("Total tags: {}\n", report.total_tags));
    out.push_str(&format!("Unique tags: {}\n", report.unique_tags()));
    if let Some((tag, count)) = &report.most_common_tag {
        out.push_str(&format!("Most common tag: '{}' ({} times)\n", tag, count));
    }

    out.push_str(&format!(
        "Average quote length: {:.1} characters\n",
        report.lengths.average
    ));
    out.push_str(&format!(
        "Shortest quote: {} characters\n",
        report.lengths.shortest
    ));
    out.push_str(&format!(
        "Longest quote: {} characters\n",
        report.lengths.longest
    ));

    out.push_str("\nTOP 5 AUTHORS:\n");
    for (i, (author, count)) in report.top_authors.iter().enumerate() {
        out.push_str(&format!("  {}. {}: {} quotes\n", i + 1, author, count));
    }

    if !report.top_tags.is_empty() {
        out.push_str("\nTOP 10 TAGS:\n");
        for (i, (tag, count)) in report.top_tags.iter().enumerate() {
            out.push_str(&format!("  {}. {}: {} times\n", i + 1, tag, count));
        }
    }

    out
}

pub fn print_report(report: Option<&Report>) {
    print!("{}", format_report(report));
}

/// Formats the first `count` records in full
pub fn format_sample(records: &[Record], count: usize) -> String {
    if records.is_empty() {
        return "No quotes to display.\n".to_string();
    }

    let shown = count.min(records.len());
    let mut out = String::new();
    heading(
        &mut out,
        &format!("SAMPLE QUOTES (showing {} of {})", shown, records.len()),
    );

    for (i, record) in records.iter().take(shown).enumerate() {
        out.push_str(&format!("\nQuote {}:\n", i + 1));
        out.push_str(&format!("   \"{}\"\n", record.text()));
        out.push_str(&format!("   - {}\n", record.author()));
        if !record.tags().is_empty() {
            out.push_str(&format!("   Tags: {}\n", record.tags().join(", ")));
        }
        out.push_str(&format!(
            "   Scraped: {}\n",
            timestamp::format(&record.scraped_at())
        ));
    }

    out
}

pub fn print_sample(records: &[Record], count: usize) {
    print!("{}", format_sample(records, count));
}

/// Formats search matches, listing at most [`SEARCH_PREVIEW`] of them
pub fn format_search_results(term: &str, matches: &[&Record]) -> String {
    let mut out = format!(
        "Found {} quotes matching '{}':\n",
        matches.len(),
        term.to_lowercase()
    );

    for (i, record) in matches.iter().take(SEARCH_PREVIEW).enumerate() {
        out.push_str(&format!(
            "\n{}. \"{}\" - {}\n",
            i + 1,
            record.text(),
            record.author()
        ));
        if !record.tags().is_empty() {
            out.push_str(&format!("   Tags: {}\n", record.tags().join(", ")));
        }
    }

    if matches.len() > SEARCH_PREVIEW {
        out.push_str(&format!(
            "\n... and {} more matches.\n",
            matches.len() - SEARCH_PREVIEW
        ));
    }

    out
}

pub fn print_search_results(term: &str, matches: &[&Record]) {
    print!("{}", format_search_results(term, matches));
}
