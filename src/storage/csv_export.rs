//! CSV export
//!
//! Columns are `text,author,tags,scraped_at`. Tags are joined into one cell
//! with `", "`, so a tag that itself contains `", "` cannot be told apart
//! from two tags. The export is one-way; JSON is the format to load from.

use crate::record::{timestamp, Record};
use crate::storage::traits::{Exporter, StorageError, StorageResult};
use serde::Serialize;
use std::path::Path;

/// Separator placed between tags in the `tags` column
pub const TAG_SEPARATOR: &str = ", ";

#[derive(Serialize)]
struct CsvRow<'a> {
    text: &'a str,
    author: &'a str,
    tags: String,
    scraped_at: String,
}

impl<'a> From<&'a Record> for CsvRow<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            text: record.text(),
            author: record.author(),
            tags: record.tags().join(TAG_SEPARATOR),
            scraped_at: timestamp::format(&record.scraped_at()),
        }
    }
}

/// Comma-separated table format
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormat;

impl Exporter for CsvFormat {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn encode(&self, records: &[Record]) -> StorageResult<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let mut writer = ::csv::WriterBuilder::new()
                .terminator(::csv::Terminator::CRLF)
                .from_writer(&mut buffer);

            if records.is_empty() {
                writer.write_record(["text", "author", "tags", "scraped_at"])?;
            }
            for record in records {
                writer.serialize(CsvRow::from(record))?;
            }
            writer.flush().map_err(StorageError::Io)?;
        }

        Ok(buffer)
    }
}

/// Saves records as a CSV table
pub fn save_csv(records: &[Record], path: &Path) -> StorageResult<()> {
    CsvFormat.save(records, path)?;
    tracing::info!("Saved {} quotes to {}", records.len(), path.display());
    Ok(())
}
