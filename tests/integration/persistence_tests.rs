//! Integration tests for persistence
//!
//! Crawled records are exported, reloaded and compared field for field.

use quote_ripple::crawler::{CrawlSettings, Crawler, FetchSettings};
use quote_ripple::storage::{export_all, load_json, save_csv, save_json, StorageError};
use quote_ripple::{analyze, search, Session};
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<html><body>
    <div class="quote">
        <span class="text">“Wer mit Ungeheuern kämpft, mag zusehn.”</span>
        <small class="author">Friedrich Nietzsche</small>
        <a class="tag">philosophy</a><a class="tag">monsters</a><a class="tag">philosophy</a>
    </div>
    <div class="quote">
        <span class="text">“A room without books is like a body without a soul.”</span>
        <small class="author">Marcus Tullius Cicero</small>
        <a class="tag">books</a><a class="tag">simile, soul</a>
    </div>
    <div class="quote">
        <span class="text">“Unattributed.”</span>
    </div>
</body></html>"#;

async fn crawled_records() -> Vec<quote_ripple::Record> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .mount(&server)
        .await;

    let crawler = Crawler::new(CrawlSettings {
        fetch: FetchSettings {
            user_agent: "TestBot/1.0".to_string(),
            timeout: Duration::from_secs(5),
        },
        request_delay: Duration::ZERO,
    });
    crawler.crawl(&server.uri(), 1).await
}

#[tokio::test]
async fn test_json_round_trip_of_crawled_records() {
    let records = crawled_records().await;
    assert_eq!(records.len(), 3);

    let dir = tempdir().unwrap();
    let path = dir.path().join("quotes.json");
    save_json(&records, &path).unwrap();

    let loaded = load_json(&path).unwrap();
    assert_eq!(loaded, records);
    assert_eq!(loaded[0].tags(), &["philosophy", "monsters", "philosophy"]);
    assert_eq!(loaded[2].author(), "Unknown");
}

#[tokio::test]
async fn test_csv_export_joins_tags() {
    let records = crawled_records().await;

    let dir = tempdir().unwrap();
    let path = dir.path().join("quotes.csv");
    save_csv(&records, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][2], "philosophy, monsters, philosophy");
    // "simile, soul" is one tag but reads back like two
    assert_eq!(&rows[1][2], "books, simile, soul");
    assert_eq!(&rows[2][2], "");
}

#[tokio::test]
async fn test_export_then_reload_into_session() {
    let records = crawled_records().await;
    let dir = tempdir().unwrap();

    let files = export_all(&records, dir.path()).unwrap();
    assert!(files.csv.exists());

    let mut session = Session::new();
    assert_eq!(session.load(&files.json).unwrap(), 3);
    assert_eq!(session.records(), records.as_slice());

    let report = analyze(session.records()).unwrap();
    assert_eq!(report.most_common_tag, Some(("philosophy".to_string(), 2)));
    assert_eq!(search(session.records(), "CICERO").len(), 1);
}

#[tokio::test]
async fn test_save_replaces_previous_file() {
    let records = crawled_records().await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("quotes.json");

    save_json(&records, &path).unwrap();
    save_json(&records[..1], &path).unwrap();

    assert_eq!(load_json(&path).unwrap().len(), 1);
}

#[test]
fn test_failed_save_keeps_original() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("quotes.json");
    std::fs::write(&path, "[]").unwrap();

    // A directory cannot be written as a file
    let result = save_json(&[], dir.path());
    assert!(matches!(result, Err(StorageError::Io(_))));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
}
