//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building an HTTP client that presents itself as a desktop browser
//! - GET requests to fetch page markup
//! - Error classification into transport failures

use crate::config::Config;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Transport failure while retrieving a page
///
/// Every variant means the page produced no markup. The coordinator ends the
/// crawl on any of them and keeps what it already collected.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid address {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },

    #[error("HTTP error for {url}: {source}")]
    Request { url: String, source: reqwest::Error },
}

/// Settings for the HTTP session of one crawl
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Value of the `User-Agent` header
    pub user_agent: String,

    /// Whole-request timeout
    pub timeout: Duration,
}

impl FetchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            user_agent: config.user_agent.user_agent.clone(),
            timeout: Duration::from_secs(config.crawler.request_timeout_secs),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Builds an HTTP client with the browser-like header set
///
/// # Arguments
///
/// * `settings` - User agent and timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client (e.g. unusable header value)
pub fn build_http_client(settings: &FetchSettings) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

    Client::builder()
        .user_agent(settings.user_agent.as_str())
        .default_headers(headers)
        .timeout(settings.timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// One pooled HTTP session
///
/// A fetcher lives for exactly one crawl: the coordinator builds it when the
/// crawl starts and drops it on every exit path.
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(settings)?,
        })
    }

    /// Fetches a page and returns its markup
    ///
    /// # Arguments
    ///
    /// * `address` - Absolute http(s) address
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Body of a 2xx response
    /// * `Err(FetchError)` - Bad address, network failure, timeout or non-2xx status
    pub async fn fetch(&self, address: &str) -> Result<String, FetchError> {
        let url = parse_address(address)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(address, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: address.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: address.to_string(),
                }
            } else {
                FetchError::Body {
                    url: address.to_string(),
                    source: e,
                }
            }
        })
    }
}

fn parse_address(address: &str) -> Result<Url, FetchError> {
    let url = Url::parse(address).map_err(|e| FetchError::InvalidUrl {
        url: address.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl {
            url: address.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

fn classify(address: &str, error: reqwest::Error) -> FetchError {
    let url = address.to_string();
    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_connect() {
        FetchError::Connect { url }
    } else {
        FetchError::Request { url, source: error }
    }
}
