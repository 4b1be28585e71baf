use std::fmt;
use thiserror::Error;

/// Errors a recipe store can report from a fetch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The backing recipe collection could not be located or opened
    #[error("Could not find recipes data file: {0}")]
    DataUnavailable(String),

    /// A record in the collection was malformed
    #[error("Failed to decode recipes: {0}")]
    DecodeFailure(String),

    /// The query was rejected before any filtering took place
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::DataUnavailable(_) => ErrorKind::DataUnavailable,
            FetchError::DecodeFailure(_) => ErrorKind::DecodeFailure,
            FetchError::InvalidQuery(_) => ErrorKind::InvalidQuery,
        }
    }
}

/// Category of a failed search, as surfaced in the search state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DataUnavailable,
    DecodeFailure,
    InvalidQuery,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::DataUnavailable => "data unavailable",
            ErrorKind::DecodeFailure => "decode failure",
            ErrorKind::InvalidQuery => "invalid query",
        };
        f.write_str(name)
    }
}

/// Errors returned by the crate's convenience entry points
#[derive(Error, Debug)]
pub enum SearchError {
    /// The recipe store failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
