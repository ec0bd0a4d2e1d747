//! Pagination: finding the next listing page
//!
//! The site marks its forward link as `<li class="next"><a href="/page/2/">`.
//! The href is relative to the site root, so the next address is the crawl's
//! base address with the href appended verbatim.

use scraper::{Html, Selector};

/// Returns the address of the page after this one, if there is one
///
/// `None` is the normal end of a crawl: the page has no `li.next` link, the
/// link has no usable href, or the markup could not be read.
///
/// # Arguments
///
/// * `markup` - HTML of the current page
/// * `base_address` - Site root the relative href is appended to
///
/// # Example
///
/// ```
/// use quote_ripple::crawler::next_page;
///
/// let html = r#"<ul class="pager"><li class="next"><a href="/page/2/">Next</a></li></ul>"#;
/// assert_eq!(
///     next_page(html, "http://quotes.toscrape.com"),
///     Some("http://quotes.toscrape.com/page/2/".to_string())
/// );
/// ```
pub fn next_page(markup: &str, base_address: &str) -> Option<String> {
    let next_link = Selector::parse("li.next a").ok()?;
    let document = Html::parse_document(markup);

    let href = document
        .select(&next_link)
        .next()?
        .value()
        .attr("href")?
        .trim();

    if href.is_empty() {
        return None;
    }

    Some(format!("{}{}", base_address, href))
}
