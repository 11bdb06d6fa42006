//! Error types for the provider client

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for generative-AI provider calls
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Unexpected response format
    #[error("unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// The provider answered with no usable text
    #[error("provider returned an empty response")]
    Empty,
}

impl From<ProviderError> for CrateError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Http(e) => CrateError::Http(e),
            _ => CrateError::Provider(err.to_string()),
        }
    }
}
