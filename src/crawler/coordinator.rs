//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives one crawl from the base address to a terminal
//! condition:
//! - Fetching each listing page through a single pooled HTTP session
//! - Extracting the page's records and appending them in visit order
//! - Following the "next" link until the site ends or the page budget is spent
//! - Pausing between pages to keep the request rate polite
//!
//! Each page is fetched exactly once; extraction and navigation share the
//! same markup.

use crate::config::Config;
use crate::crawler::extractor::extract_page;
use crate::crawler::fetcher::{FetchError, FetchSettings, Fetcher};
use crate::crawler::navigator::next_page;
use crate::record::{timestamp, Record};
use chrono::NaiveDateTime;
use std::fmt;
use std::time::{Duration, Instant};

/// Phase of a running crawl, traced on every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrawlState {
    Start,
    Fetching,
    Extracting,
    Navigating,
    Done,
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Navigating => "navigating",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Why a crawl ended
///
/// All three are normal completions. A transport failure still returns the
/// records gathered from earlier pages.
#[derive(Debug)]
pub enum StopReason {
    /// The last page had no next link
    NoNextPage,

    /// `max_pages` pages were visited
    PageBudget,

    /// A page could not be fetched
    TransportFailure(FetchError),
}

impl StopReason {
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoNextPage => f.write_str("no more pages found"),
            Self::PageBudget => f.write_str("page limit reached"),
            Self::TransportFailure(e) => write!(f, "stopped early: {}", e),
        }
    }
}

/// Result of one crawl
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Records of every visited page, in visit order
    pub records: Vec<Record>,

    /// Pages whose fetch was attempted
    pub pages_visited: u32,

    /// Containers passed over because they had no usable text
    pub skipped_containers: usize,

    pub stop: StopReason,
}

/// Crawl figures without the records themselves
#[derive(Debug)]
pub struct CrawlSummary {
    pub quotes_collected: usize,
    pub pages_visited: u32,
    pub skipped_containers: usize,
    pub stop: StopReason,
}

impl CrawlOutcome {
    /// Separates the records from the figures describing the crawl
    pub fn split(self) -> (Vec<Record>, CrawlSummary) {
        let summary = CrawlSummary {
            quotes_collected: self.records.len(),
            pages_visited: self.pages_visited,
            skipped_containers: self.skipped_containers,
            stop: self.stop,
        };
        (self.records, summary)
    }
}

/// Tunables for a crawl
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub fetch: FetchSettings,

    /// Pause between consecutive page requests
    pub request_delay: Duration,
}

impl CrawlSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            fetch: FetchSettings::from_config(config),
            request_delay: Duration::from_millis(config.crawler.request_delay_ms),
        }
    }
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Main crawler structure
///
/// A crawler holds only settings. The HTTP session is opened inside
/// [`Crawler::run`] and closed when it returns, so every crawl gets its own
/// connection pool and its own record accumulator.
#[derive(Debug, Clone, Default)]
pub struct Crawler {
    settings: CrawlSettings,
}

impl Crawler {
    pub fn new(settings: CrawlSettings) -> Self {
        Self { settings }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(CrawlSettings::from_config(config))
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// Crawls and returns only the records
    ///
    /// # Arguments
    ///
    /// * `base_address` - First page, also the root next-links are appended to
    /// * `max_pages` - Upper bound on pages visited
    pub async fn crawl(&self, base_address: &str, max_pages: u32) -> Vec<Record> {
        self.run(base_address, max_pages).await.records
    }

    /// Runs the main crawl loop
    ///
    /// This is the core crawling logic that:
    /// 1. Fetches the current page
    /// 2. Extracts its records
    /// 3. Finds the next page from the same markup
    /// 4. Waits the configured delay before the next request
    ///
    /// Never fails: a transport failure ends the crawl with the records
    /// collected so far.
    pub async fn run(&self, base_address: &str, max_pages: u32) -> CrawlOutcome {
        let started = Instant::now();
        let mut state = CrawlState::Start;
        let mut records: Vec<Record> = Vec::new();
        let mut pages_visited = 0u32;
        let mut skipped_containers = 0usize;
        let mut last_stamp: Option<NaiveDateTime> = None;
        let mut current = Some(base_address.to_string());

        tracing::info!(
            "Starting crawl from {} (max {} pages)",
            base_address,
            max_pages
        );

        let fetcher = match Fetcher::new(&self.settings.fetch) {
            Ok(fetcher) => fetcher,
            Err(e) => {
                tracing::error!("Failed to build HTTP client: {}", e);
                return CrawlOutcome {
                    records,
                    pages_visited,
                    skipped_containers,
                    stop: StopReason::TransportFailure(FetchError::Request {
                        url: base_address.to_string(),
                        source: e,
                    }),
                };
            }
        };

        let stop = loop {
            let Some(address) = current.take() else {
                tracing::info!("No more pages found");
                break StopReason::NoNextPage;
            };

            if pages_visited >= max_pages {
                tracing::info!("Page limit of {} reached", max_pages);
                break StopReason::PageBudget;
            }

            pages_visited += 1;
            enter(&mut state, CrawlState::Fetching);
            tracing::info!("Scraping page {}: {}", pages_visited, address);

            let markup = match fetcher.fetch(&address).await {
                Ok(markup) => markup,
                Err(e) => {
                    tracing::warn!("Stopping crawl at page {}: {}", pages_visited, e);
                    break StopReason::TransportFailure(e);
                }
            };

            enter(&mut state, CrawlState::Extracting);
            let stamp = next_stamp(last_stamp);
            last_stamp = Some(stamp);

            let extraction = extract_page(&markup, stamp);
            for skipped in &extraction.skipped {
                tracing::warn!(
                    "Skipping quote #{} on {}: {:?}",
                    skipped.index + 1,
                    address,
                    skipped.reason
                );
            }
            tracing::debug!(
                "Extracted {} quotes from {} ({} skipped)",
                extraction.records.len(),
                address,
                extraction.skipped.len()
            );
            skipped_containers += extraction.skipped.len();
            records.extend(extraction.records);

            enter(&mut state, CrawlState::Navigating);
            current = next_page(&markup, base_address);

            if current.is_some() && pages_visited < max_pages {
                tokio::time::sleep(self.settings.request_delay).await;
            }
        };

        enter(&mut state, CrawlState::Done);
        tracing::info!(
            "Crawl completed: {} quotes from {} pages in {:?}",
            records.len(),
            pages_visited,
            started.elapsed()
        );

        CrawlOutcome {
            records,
            pages_visited,
            skipped_containers,
            stop,
        }
    }
}

fn enter(state: &mut CrawlState, next: CrawlState) {
    tracing::trace!("Crawl state: {} -> {}", state, next);
    *state = next;
}

/// Capture time for the next page, never earlier than the previous one
fn next_stamp(last: Option<NaiveDateTime>) -> NaiveDateTime {
    let now = timestamp::now();
    match last {
        Some(last) if last > now => last,
        _ => now,
    }
}
