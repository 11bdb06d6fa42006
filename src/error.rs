//! Error types for the curator crate

use thiserror::Error;

/// Result type for curator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for curator operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Web crawling error
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Generative-AI provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Ingestion collaborator error
    #[error("Ingest error: {0}")]
    Ingest(String),
}
