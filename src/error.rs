//! Error types for the SEO analyzer.
//!
//! - `AppError`: failures that end an analysis (bad input, transport errors)
//! - `Result<T>`: alias used across the crate
//!
//! Missing page elements are never errors; they are represented in the report.

use thiserror::Error;

/// Domain-specific errors for analysis operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// DNS, connection, TLS, timeout or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// Caller supplied values outside their documented range
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an input validation error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidUrl(error.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
