//! Quote extraction from listing pages
//!
//! Every `div.quote` container on a page becomes at most one [`Record`]:
//! - `span.text` holds the quotation; without it the container is skipped
//! - `small.author` holds the author; without it the author is "Unknown"
//! - each `a.tag` contributes one tag, in document order
//!
//! A bad container never spoils the rest of the page. Extraction does no
//! logging of its own; callers inspect [`PageExtraction::skipped`].

use crate::record::{timestamp, Record, UNKNOWN_AUTHOR};
use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};

/// Why a container produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `span.text` element inside the container
    MissingText,

    /// The text element exists but holds only whitespace
    EmptyText,
}

/// A container that was passed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedContainer {
    /// Position of the container on the page, counting from zero
    pub index: usize,

    pub reason: SkipReason,
}

/// Everything extracted from one page
#[derive(Debug, Clone, Default)]
pub struct PageExtraction {
    /// Records in document order
    pub records: Vec<Record>,

    /// Containers that yielded no record
    pub skipped: Vec<SkippedContainer>,
}

impl PageExtraction {
    /// Number of containers found on the page
    pub fn containers(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

struct QuoteSelectors {
    container: Selector,
    text: Selector,
    author: Selector,
    tag: Selector,
}

impl QuoteSelectors {
    fn new() -> Option<Self> {
        Some(Self {
            container: Selector::parse("div.quote").ok()?,
            text: Selector::parse("span.text").ok()?,
            author: Selector::parse("small.author").ok()?,
            tag: Selector::parse("a.tag").ok()?,
        })
    }
}

/// Extracts the records of a page, stamped with the current time
///
/// # Example
///
/// ```
/// use quote_ripple::crawler::extract;
///
/// let html = r#"<div class="quote">
///     <span class="text">Stay hungry.</span>
///     <small class="author">Steve Jobs</small>
///     <a class="tag">work</a>
/// </div>"#;
/// let records = extract(html);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].author(), "Steve Jobs");
/// ```
pub fn extract(markup: &str) -> Vec<Record> {
    extract_page(markup, timestamp::now()).records
}

/// Extracts the records of a page with an explicit capture time
///
/// # Arguments
///
/// * `markup` - The page HTML
/// * `scraped_at` - Stamp given to every record of this page
///
/// # Returns
///
/// The records found plus the containers that were skipped. A page with no
/// containers yields an empty extraction, never an error.
pub fn extract_page(markup: &str, scraped_at: NaiveDateTime) -> PageExtraction {
    let mut extraction = PageExtraction::default();

    let Some(selectors) = QuoteSelectors::new() else {
        return extraction;
    };

    let document = Html::parse_document(markup);

    for (index, container) in document.select(&selectors.container).enumerate() {
        match parse_container(container, &selectors, scraped_at) {
            Ok(record) => extraction.records.push(record),
            Err(reason) => extraction
                .skipped
                .push(SkippedContainer { index, reason }),
        }
    }

    extraction
}

fn parse_container(
    container: ElementRef<'_>,
    selectors: &QuoteSelectors,
    scraped_at: NaiveDateTime,
) -> Result<Record, SkipReason> {
    let text = container
        .select(&selectors.text)
        .next()
        .map(element_text)
        .ok_or(SkipReason::MissingText)?;

    let author = container
        .select(&selectors.author)
        .next()
        .map(element_text)
        .filter(|author| !author.is_empty())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    let tags = container.select(&selectors.tag).map(element_text).collect();

    Record::new(text, author, tags, scraped_at).map_err(|_| SkipReason::EmptyText)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
