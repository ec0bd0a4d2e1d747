//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small paginated quotes site and run
//! full crawls against it.

use quote_ripple::config::Config;
use quote_ripple::crawler::{
    crawl, CrawlSettings, Crawler, FetchError, FetchSettings, StopReason,
};
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates crawler settings without the politeness delay
fn fast_settings() -> CrawlSettings {
    CrawlSettings {
        fetch: FetchSettings {
            user_agent: "TestBot/1.0".to_string(),
            timeout: Duration::from_secs(5),
        },
        request_delay: Duration::ZERO,
    }
}

/// Renders a listing page with the given quotes and optional next link
fn listing_page(quotes: &[(&str, &str, &[&str])], next: Option<&str>) -> String {
    let mut body = String::from(
        r#"<html><head><title>Quotes to Scrape</title></head><body><div class="container"><div class="row"><div class="col-md-8">"#,
    );

    for (text, author, tags) in quotes {
        body.push_str(r#"<div class="quote" itemscope itemtype="http://schema.org/CreativeWork">"#);
        body.push_str(&format!(r#"<span class="text" itemprop="text">{}</span>"#, text));
        body.push_str(&format!(
            r#"<span>by <small class="author" itemprop="author">{}</small></span>"#,
            author
        ));
        body.push_str(r#"<div class="tags">Tags: "#);
        for tag in tags.iter() {
            body.push_str(&format!(r#"<a class="tag" href="/tag/{0}/page/1/">{0}</a>"#, tag));
        }
        body.push_str("</div></div>");
    }

    body.push_str(r#"<nav><ul class="pager">"#);
    if let Some(next) = next {
        body.push_str(&format!(
            r#"<li class="next"><a href="{}">Next <span aria-hidden="true">&rarr;</span></a></li>"#,
            next
        ));
    }
    body.push_str("</ul></nav></div></div></div></body></html>");
    body
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

/// Mounts a chain of `pages` listing pages: `/`, `/page/2/`, ... each with two quotes
async fn mount_chain(server: &MockServer, pages: usize) {
    for n in 1..=pages {
        let route = if n == 1 {
            "/".to_string()
        } else {
            format!("/page/{}/", n)
        };
        let next = if n < pages {
            Some(format!("/page/{}/", n + 1))
        } else {
            None
        };

        let first = format!("Quote {}a", n);
        let second = format!("Quote {}b", n);
        let author = format!("Author {}", n);
        let body = listing_page(
            &[
                (first.as_str(), author.as_str(), &["alpha"]),
                (second.as_str(), author.as_str(), &["beta", "gamma"]),
            ],
            next.as_deref(),
        );

        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .respond_with(html(body))
            .expect(1)
            .mount(server)
            .await;
    }
}

fn texts(records: &[quote_ripple::Record]) -> Vec<&str> {
    records.iter().map(|r| r.text()).collect()
}

#[tokio::test]
async fn test_full_crawl_follows_pagination() {
    let server = MockServer::start().await;
    mount_chain(&server, 3).await;

    let crawler = Crawler::new(fast_settings());
    let outcome = crawler.run(&server.uri(), 10).await;

    assert_eq!(outcome.pages_visited, 3);
    assert!(matches!(outcome.stop, StopReason::NoNextPage));
    assert_eq!(
        texts(&outcome.records),
        vec!["Quote 1a", "Quote 1b", "Quote 2a", "Quote 2b", "Quote 3a", "Quote 3b"]
    );
    assert_eq!(outcome.records[3].author(), "Author 2");
    assert_eq!(outcome.records[3].tags(), &["beta", "gamma"]);
}

#[tokio::test]
async fn test_page_budget_limits_requests() {
    let server = MockServer::start().await;

    for (route, next, text) in [
        ("/", Some("/page/2/"), "one"),
        ("/page/2/", Some("/page/3/"), "two"),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html(listing_page(&[(text, "A", &[])], next)))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/page/3/"))
        .respond_with(html(listing_page(&[("three", "A", &[])], None)))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = Crawler::new(fast_settings()).run(&server.uri(), 2).await;

    assert_eq!(outcome.pages_visited, 2);
    assert!(matches!(outcome.stop, StopReason::PageBudget));
    assert_eq!(texts(&outcome.records), vec!["one", "two"]);
}

#[tokio::test]
async fn test_navigation_end_before_budget() {
    let server = MockServer::start().await;
    mount_chain(&server, 2).await;

    let records = Crawler::new(fast_settings()).crawl(&server.uri(), 5).await;

    assert_eq!(
        texts(&records),
        vec!["Quote 1a", "Quote 1b", "Quote 2a", "Quote 2b"]
    );
}

#[tokio::test]
async fn test_transport_failure_keeps_earlier_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(listing_page(
            &[("Survivor", "A", &["kept"])],
            Some("/page/2/"),
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = Crawler::new(fast_settings()).run(&server.uri(), 5).await;

    assert_eq!(outcome.pages_visited, 2);
    assert_eq!(texts(&outcome.records), vec!["Survivor"]);
    match outcome.stop {
        StopReason::TransportFailure(FetchError::Status { status, .. }) => assert_eq!(status, 500),
        other => panic!("unexpected stop: {:?}", other),
    }
}

#[tokio::test]
async fn test_first_page_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let outcome = Crawler::new(fast_settings()).run(&server.uri(), 5).await;

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.pages_visited, 1);
    assert!(outcome.stop.is_transport_failure());
}

#[tokio::test]
async fn test_unreachable_site() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let outcome = Crawler::new(fast_settings())
        .run(&format!("http://127.0.0.1:{}", port), 3)
        .await;

    assert!(outcome.records.is_empty());
    assert!(outcome.stop.is_transport_failure());
}

#[tokio::test]
async fn test_malformed_quotes_are_skipped() {
    let server = MockServer::start().await;

    let body = r#"<html><body>
        <div class="quote"><span class="text">Good one</span><small class="author">A</small></div>
        <div class="quote"><small class="author">No text here</small></div>
        <div class="quote"><span class="text"></span><small class="author">B</small></div>
        <div class="quote"><span class="text">No author</span></div>
    </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(body.to_string()))
        .mount(&server)
        .await;

    let outcome = Crawler::new(fast_settings()).run(&server.uri(), 1).await;

    assert_eq!(texts(&outcome.records), vec!["Good one", "No author"]);
    assert_eq!(outcome.records[1].author(), "Unknown");
    assert_eq!(outcome.skipped_containers, 2);
    assert!(matches!(outcome.stop, StopReason::NoNextPage));
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(html(listing_page(&[("Hi", "A", &[])], None)))
        .expect(1)
        .mount(&server)
        .await;

    let records = Crawler::new(fast_settings()).crawl(&server.uri(), 1).await;
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_delay_between_pages() {
    let server = MockServer::start().await;
    mount_chain(&server, 3).await;

    let mut settings = fast_settings();
    settings.request_delay = Duration::from_millis(150);

    let started = Instant::now();
    let outcome = Crawler::new(settings).run(&server.uri(), 3).await;

    assert_eq!(outcome.pages_visited, 3);
    // Two pauses: after page 1 and after page 2, none after the last page.
    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_timestamps_never_decrease() {
    let server = MockServer::start().await;
    mount_chain(&server, 3).await;

    let records = Crawler::new(fast_settings()).crawl(&server.uri(), 3).await;

    assert_eq!(records.len(), 6);
    assert!(records
        .windows(2)
        .all(|pair| pair[0].scraped_at() <= pair[1].scraped_at()));
}

#[tokio::test]
async fn test_crawl_from_config() {
    let server = MockServer::start().await;
    mount_chain(&server, 2).await;

    let mut config = Config::default();
    config.crawler.base_url = server.uri();
    config.crawler.max_pages = 2;
    config.crawler.request_delay_ms = 0;

    let records = crawl(&config).await;
    assert_eq!(
        texts(&records),
        vec!["Quote 1a", "Quote 1b", "Quote 2a", "Quote 2b"]
    );
}
