//! JSON persistence
//!
//! The file is an array of `{text, author, tags, scraped_at}` objects,
//! pretty-printed with two-space indentation. Non-ASCII text is written as
//! is. Saving then loading gives back an identical collection.

use crate::record::Record;
use crate::storage::traits::{Exporter, StorageError, StorageResult};
use std::path::Path;

/// JSON array format
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Exporter for JsonFormat {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn encode(&self, records: &[Record]) -> StorageResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(records)?)
    }
}

/// Saves records as a JSON array
pub fn save_json(records: &[Record], path: &Path) -> StorageResult<()> {
    JsonFormat.save(records, path)?;
    tracing::info!("Saved {} quotes to {}", records.len(), path.display());
    Ok(())
}

/// Loads records from a JSON array
///
/// # Returns
///
/// * `Ok(Vec<Record>)` - The stored collection
/// * `Err(StorageError::NotFound)` - No file at `path`
/// * `Err(StorageError::Json)` - Malformed JSON or an invalid record
pub fn load_json(path: &Path) -> StorageResult<Vec<Record>> {
    if !path.exists() {
        return Err(StorageError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read(path)?;
    let records: Vec<Record> = serde_json::from_slice(&content)?;

    tracing::info!("Loaded {} quotes from {}", records.len(), path.display());
    Ok(records)
}
