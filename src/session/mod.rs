//! Session state: the current record collection
//!
//! A [`Session`] is the only owner of the records an interactive run works
//! on. Crawling and loading replace the collection as a whole; analysis,
//! search and saving only borrow it.

use crate::analysis::{analyze, Report};
use crate::config::{validate, Config};
use crate::crawler::{CrawlSummary, Crawler};
use crate::record::Record;
use crate::search::search;
use crate::storage::{export_all, load_json, ExportedFiles, StorageResult};
use std::path::Path;

/// What a configured crawl produced
#[derive(Debug)]
pub struct Harvest {
    pub summary: CrawlSummary,

    /// Exported files; `None` when saving was off or nothing was collected
    pub files: Option<ExportedFiles>,
}

#[derive(Debug, Default)]
pub struct Session {
    records: Vec<Record>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Crawls and makes the result the current collection
    pub async fn scrape(
        &mut self,
        crawler: &Crawler,
        base_address: &str,
        max_pages: u32,
    ) -> CrawlSummary {
        let (records, summary) = crawler.run(base_address, max_pages).await.split();
        self.records = records;
        summary
    }

    /// Crawls as `config` describes and optionally exports the result
    ///
    /// The configuration is validated first, so overrides applied after
    /// loading are checked before any request is made. Exports go to
    /// `config.output.directory`.
    ///
    /// # Arguments
    ///
    /// * `config` - Crawl and output settings
    /// * `save` - Whether to write the CSV and JSON exports
    ///
    /// # Returns
    ///
    /// * `Ok(Harvest)` - The crawl summary and any files written
    /// * `Err(QuoteError::Config)` - The configuration is invalid
    /// * `Err(QuoteError::Storage)` - The exports could not be written
    pub async fn harvest(&mut self, config: &Config, save: bool) -> crate::Result<Harvest> {
        validate(config)?;

        let crawler = Crawler::from_config(config);
        let summary = self
            .scrape(&crawler, &config.crawler.base_url, config.crawler.max_pages)
            .await;

        let files = if save && !self.is_empty() {
            Some(self.export(Path::new(&config.output.directory))?)
        } else {
            None
        };

        Ok(Harvest { summary, files })
    }

    /// Loads a JSON file and makes it the current collection
    ///
    /// On error the current collection is kept.
    pub fn load(&mut self, path: &Path) -> StorageResult<usize> {
        let records = load_json(path)?;
        self.records = records;
        Ok(self.records.len())
    }

    pub fn analyze(&self) -> Option<Report> {
        analyze(&self.records)
    }

    pub fn search(&self, term: &str) -> Vec<&Record> {
        search(&self.records, term)
    }

    /// Writes timestamped CSV and JSON exports into `directory`
    pub fn export(&self, directory: &Path) -> StorageResult<ExportedFiles> {
        export_all(&self.records, directory)
    }
}
