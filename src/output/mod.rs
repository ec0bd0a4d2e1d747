//! Output module for presenting records and their analysis
//!
//! This module handles:
//! - Terminal rendering of crawl summaries, reports, samples and search hits
//! - Markdown reports written next to exported data

mod console;
mod markdown;

pub use console::{
    format_crawl_summary, format_report, format_sample, format_search_results,
    print_crawl_summary, print_report, print_sample, print_search_results, SEARCH_PREVIEW,
};
pub use markdown::{format_markdown_report, generate_markdown_report};
