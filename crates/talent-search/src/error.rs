//! Error types for talent-search

use thiserror::Error;

/// Error type for similarity index operations
#[derive(Error, Debug)]
pub enum Error {
    /// Index construction failed
    #[error("Index error: {0}")]
    Index(String),

    /// Search operation failed
    #[error("Search error: {0}")]
    Search(String),

    /// Vectors of inconsistent length
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: usize,
        /// Actual dimensions
        actual: usize,
    },
}

impl Error {
    /// True for failures of the index backend itself, as opposed to bad input.
    ///
    /// Only these are eligible for the brute-force fallback.
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Error::Index(_) | Error::Search(_))
    }
}

/// Result type for similarity index operations
pub type Result<T> = std::result::Result<T, Error>;
