// src/error.rs
// Unified error type for productive-mcp

use thiserror::Error;

/// All the ways a Productive API call can fail
#[derive(Error, Debug)]
pub enum ProductiveError {
    /// Invalid input from the tool caller
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transport-level HTTP failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the Productive API
    #[error("Productive API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected JSON:API shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing or malformed environment configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Catch-all for string errors from tool internals
    #[error("{0}")]
    Other(String),

    /// Anything else
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, ProductiveError>;

impl From<String> for ProductiveError {
    fn from(s: String) -> Self {
        ProductiveError::Other(s)
    }
}

// MCP tool handlers return Result<String, String>, so errors cross that
// boundary as their display form.
impl From<ProductiveError> for String {
    fn from(e: ProductiveError) -> Self {
        e.to_string()
    }
}
