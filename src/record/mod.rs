//! Record model for extracted quotations
//!
//! A [`Record`] is an immutable value: once built it is only read. Every
//! record has non-empty text; the constructor and deserialization both
//! enforce this.

pub mod timestamp;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Author recorded when a quotation carries no attribution
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Errors raised while building a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("quotation text is empty")]
    EmptyText,
}

/// One extracted quotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Record {
    text: String,
    author: String,
    tags: Vec<String>,
    #[serde(with = "timestamp")]
    scraped_at: NaiveDateTime,
}

impl Record {
    /// Builds a record, rejecting blank text
    ///
    /// # Arguments
    ///
    /// * `text` - The quotation body
    /// * `author` - The attributed author
    /// * `tags` - Tags in the order they appeared on the page
    /// * `scraped_at` - When the record was captured
    ///
    /// # Returns
    ///
    /// * `Ok(Record)` - The record
    /// * `Err(RecordError::EmptyText)` - `text` is empty or whitespace only
    pub fn new(
        text: impl Into<String>,
        author: impl Into<String>,
        tags: Vec<String>,
        scraped_at: NaiveDateTime,
    ) -> Result<Self, RecordError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(RecordError::EmptyText);
        }

        Ok(Self {
            text,
            author: author.into(),
            tags,
            scraped_at,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn scraped_at(&self) -> NaiveDateTime {
        self.scraped_at
    }

    /// Length of the quotation in characters, not bytes
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Wire shape of a record before validation
#[derive(Deserialize)]
struct RawRecord {
    text: String,
    author: String,
    tags: Vec<String>,
    #[serde(with = "timestamp")]
    scraped_at: NaiveDateTime,
}

impl TryFrom<RawRecord> for Record {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        Record::new(raw.text, raw.author, raw.tags, raw.scraped_at)
    }
}
