//! Error types for the crawler module

use std::time::Duration;

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Network failure: timeout, connection failure, or non-2xx status
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Headless browser could not be launched or configured
    #[error("browser error: {0}")]
    Browser(String),

    /// Page render or DOM read failed inside the browser
    #[error("render error: {0}")]
    Render(String),

    /// Rendered page load exceeded its time budget
    #[error("render timed out after {0:?}")]
    Timeout(Duration),

    /// HTML parsing error
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// No strategy produced a non-empty article within one attempt
    #[error("no strategy produced a non-empty article")]
    EmptyExtraction,
}

impl From<CrawlError> for CrateError {
    fn from(err: CrawlError) -> Self {
        match err {
            CrawlError::Network(e) => CrateError::Http(e),
            _ => CrateError::Crawl(err.to_string()),
        }
    }
}
