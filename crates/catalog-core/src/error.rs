//! Error types for the catalog browser
//!
//! This module defines all error types used throughout the library.
//! CatalogError implements Serialize so frontends can show it as a plain message.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a status that is neither success nor error
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Rate limited by the server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Requested resource was not found (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Catalog document was not valid JSON
    #[error("Invalid catalog document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// Series or season identifier that cannot be used as a path
    #[error("Invalid identifier: {0:?}")]
    InvalidId(String),

    /// Configuration or option value out of range or unknown
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidUrl(err.to_string())
    }
}

/// Serialize CatalogError as a string
impl Serialize for CatalogError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
