//! Error types for BookFinder Core

use thiserror::Error;

/// Result type alias using BookFinderError
pub type Result<T> = std::result::Result<T, BookFinderError>;

/// Top-level error type for all BookFinder operations
#[derive(Debug, Error)]
pub enum BookFinderError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while talking to the catalog service
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Search request answered with a non-2xx status
    #[error("Catalog search failed with status {status}")]
    SearchRejected { status: u16 },

    /// Detail request answered with a non-2xx status
    #[error("Failed to fetch book")]
    BookUnavailable { status: u16 },

    /// The request never produced a response
    #[error("{0}")]
    Transport(String),

    /// The response body was not JSON of the expected shape
    #[error("Malformed catalog response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Upstream HTTP status, when the catalog answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::SearchRejected { status } | FetchError::BookUnavailable { status } => {
                Some(*status)
            }
            FetchError::Transport(_) | FetchError::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Corrupt value under '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Errors raised while reading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}
