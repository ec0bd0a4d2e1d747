//! Storage module for persisting record collections
//!
//! This module provides:
//! - JSON save/load, lossless
//! - CSV export, lossy for tags
//! - Timestamped side-by-side exports of both formats
//!
//! Every write replaces the destination file as a whole.

mod csv_export;
mod json;
mod traits;

pub use csv_export::{save_csv, CsvFormat, TAG_SEPARATOR};
pub use json::{load_json, save_json, JsonFormat};
pub use traits::{replace_file, Exporter, StorageError, StorageResult};

use crate::record::Record;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Paths written by [`export_all`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub csv: PathBuf,
    pub json: PathBuf,
}

/// File stem for an export taken at `at`, e.g. `quotes_20240501_120000`
pub fn export_stem(at: NaiveDateTime) -> String {
    format!("quotes_{}", at.format("%Y%m%d_%H%M%S"))
}

/// Writes the collection as both CSV and JSON under `directory`
///
/// File names carry the current local time so successive exports do not
/// overwrite each other. The directory is created if needed.
///
/// # Arguments
///
/// * `records` - The collection to export
/// * `directory` - Destination directory
///
/// # Returns
///
/// * `Ok(ExportedFiles)` - Paths of the two files written
/// * `Err(StorageError)` - A write failed
pub fn export_all(records: &[Record], directory: &Path) -> StorageResult<ExportedFiles> {
    export_all_at(records, directory, crate::record::timestamp::now())
}

/// Like [`export_all`] with an explicit timestamp for the file names
pub fn export_all_at(
    records: &[Record],
    directory: &Path,
    at: NaiveDateTime,
) -> StorageResult<ExportedFiles> {
    std::fs::create_dir_all(directory)?;

    let stem = export_stem(at);
    let files = ExportedFiles {
        csv: directory.join(format!("{}.{}", stem, CsvFormat.extension())),
        json: directory.join(format!("{}.{}", stem, JsonFormat.extension())),
    };

    save_csv(records, &files.csv)?;
    save_json(records, &files.json)?;

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::timestamp;
    use tempfile::tempdir;

    #[test]
    fn test_export_stem() {
        let at = timestamp::parse("2024-05-01 09:08:07").unwrap();
        assert_eq!(export_stem(at), "quotes_20240501_090807");
    }

    #[test]
    fn test_export_all_writes_both_files() {
        let dir = tempdir().unwrap();
        let at = timestamp::parse("2024-05-01 09:08:07").unwrap();
        let records = vec![Record::new("A", "X", vec!["wisdom".to_string()], at).unwrap()];

        let files = export_all_at(&records, &dir.path().join("out"), at).unwrap();

        assert_eq!(
            files.csv,
            dir.path().join("out").join("quotes_20240501_090807.csv")
        );
        assert_eq!(
            files.json,
            dir.path().join("out").join("quotes_20240501_090807.json")
        );
        assert!(files.csv.exists());
        assert_eq!(load_json(&files.json).unwrap(), records);
    }
}
