//! Error types for the mismatch_feed crate

use thiserror::Error;

/// Errors raised while fetching history
#[derive(Debug, Error)]
pub enum FeedError {
    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reading or decoding CSV
    #[error("CSV error: {0}")]
    CsvError(String),

    /// A record is well-formed but unusable
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// The source holds no observations
    #[error("Empty source: {0}")]
    Empty(String),

    /// Error from invalid provider parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, FeedError>;

impl From<csv::Error> for FeedError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return FeedError::CsvError(err.to_string());
        }
        match err.into_kind() {
            csv::ErrorKind::Io(io) => FeedError::IoError(io),
            other => FeedError::CsvError(format!("{:?}", other)),
        }
    }
}
