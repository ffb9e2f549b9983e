//! Error types for the news source

use thiserror::Error;

/// Errors that can occur while fetching articles
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    Request(String),

    /// API returned an error response
    #[error("API error (status {status}, code {code}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// NewsAPI error code (e.g. "apiKeyInvalid")
        code: String,
        /// Error message from API
        message: String,
    },

    /// Failed to parse API response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
