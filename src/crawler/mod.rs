//! Crawler module for quote harvesting
//!
//! This module contains the crawl-and-extract pipeline:
//! - HTTP fetching with a browser-like identity and a per-request timeout
//! - Quote extraction from each listing page
//! - Pagination through the site's "next" links
//! - Overall crawl coordination with a page budget and polite delays

mod coordinator;
mod extractor;
mod fetcher;
mod navigator;

pub use coordinator::{CrawlOutcome, CrawlSettings, CrawlSummary, Crawler, StopReason};
pub use extractor::{extract, extract_page, PageExtraction, SkipReason, SkippedContainer};
pub use fetcher::{build_http_client, FetchError, FetchSettings, Fetcher};
pub use navigator::next_page;

use crate::config::Config;
use crate::record::Record;

/// Runs a complete crawl with the given configuration
///
/// This is the main entry point for callers that only want the records.
/// It crawls from `config.crawler.base_url` for at most
/// `config.crawler.max_pages` pages.
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// The records of every page reached, in page-visit order
pub async fn crawl(config: &Config) -> Vec<Record> {
    Crawler::from_config(config)
        .crawl(&config.crawler.base_url, config.crawler.max_pages)
        .await
}
