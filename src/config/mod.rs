//! Configuration module for Quote-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file means "use the defaults".
//!
//! # Example
//!
//! ```no_run
//! use quote_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("quote-ripple.toml")).unwrap();
//! println!("Crawling from: {}", config.crawler.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};
pub use validation::{validate, validate_base_url};
