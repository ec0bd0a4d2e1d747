//! Storage traits and error types
//!
//! This module defines the interface shared by the export formats and the
//! errors persistence can report.

use crate::record::Record;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A file format records can be written in
pub trait Exporter {
    /// File extension without the dot
    fn extension(&self) -> &'static str;

    /// Renders the whole collection as file contents
    fn encode(&self, records: &[Record]) -> StorageResult<Vec<u8>>;

    /// Writes the collection to `path`, replacing any existing file
    ///
    /// # Arguments
    ///
    /// * `records` - The collection to write
    /// * `path` - Destination file
    fn save(&self, records: &[Record], path: &Path) -> StorageResult<()> {
        let contents = self.encode(records)?;
        replace_file(path, &contents)
    }
}

/// Writes `contents` to `path` in one step
///
/// The bytes go to a temporary file next to the destination, which is then
/// renamed over it. A failed write leaves the previous file untouched.
pub fn replace_file(path: &Path, contents: &[u8]) -> StorageResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| StorageError::Io(e.error))?;

    Ok(())
}
