//! Quote-Ripple: a polite quotation harvester
//!
//! This crate walks the paginated listing of a quotes site, extracts each
//! quotation with its author and tags, and offers analysis, search and
//! persistence over the collected records.

pub mod analysis;
pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod search;
pub mod session;
pub mod storage;

use thiserror::Error;

/// Main error type for Quote-Ripple operations
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Quote-Ripple operations
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use analysis::{analyze, FrequencyMap, Report};
pub use config::Config;
pub use crawler::{CrawlOutcome, Crawler, StopReason};
pub use record::Record;
pub use search::search;
pub use session::{Harvest, Session};
