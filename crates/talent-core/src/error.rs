//! Error types for matching and ingestion

use thiserror::Error;

/// Error type for matching and ingestion
#[derive(Error, Debug)]
pub enum Error {
    /// Requested candidate or job does not exist
    #[error("{kind} {id} not found")]
    NotFound {
        /// Entity kind ("candidate" or "job")
        kind: &'static str,
        /// Requested id
        id: i64,
    },

    /// Embeddings of different lengths were combined
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: usize,
        /// Actual dimensions
        actual: usize,
    },

    /// Record could not be stored
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Input document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Embedding provider failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Similarity search failed on every backend
    #[error("Search error: {0}")]
    Search(String),

    /// Database unavailable or unreadable
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the requested record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

impl From<talent_store::Error> for Error {
    fn from(err: talent_store::Error) -> Self {
        use talent_store::Error as StoreError;
        match err {
            StoreError::NotFound { kind, id } => Error::NotFound { kind, id },
            StoreError::DimensionMismatch { expected, actual } => {
                Error::DimensionMismatch { expected, actual }
            }
            StoreError::Persistence(msg) => Error::Persistence(msg),
            StoreError::Database(e) => Error::Database(e.to_string()),
            StoreError::Serialization(e) => Error::Database(format!("corrupt row: {e}")),
            StoreError::Internal(msg) => Error::Internal(msg),
        }
    }
}

impl From<talent_search::Error> for Error {
    fn from(err: talent_search::Error) -> Self {
        match err {
            talent_search::Error::DimensionMismatch { expected, actual } => {
                Error::DimensionMismatch { expected, actual }
            }
            other => Error::Search(other.to_string()),
        }
    }
}

impl From<talent_embed::Error> for Error {
    fn from(err: talent_embed::Error) -> Self {
        Error::Embedding(err.to_string())
    }
}

/// Result type for matching and ingestion
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_keep_taxonomy() {
        let err: Error = talent_store::Error::NotFound {
            kind: "candidate",
            id: 3,
        }
        .into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "candidate 3 not found");

        let err: Error = talent_store::Error::Persistence("name".into()).into();
        assert!(matches!(err, Error::Persistence(_)));
    }

    #[test]
    fn test_search_errors_keep_taxonomy() {
        let err: Error = talent_search::Error::DimensionMismatch {
            expected: 4,
            actual: 2,
        }
        .into();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 4,
                actual: 2
            }
        ));

        let err: Error = talent_search::Error::Index("boom".into()).into();
        assert!(matches!(err, Error::Search(_)));
    }
}
