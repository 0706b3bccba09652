//! Error types for the candidate/job store.

/// Errors that can occur in store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No row with the requested id
    #[error("{kind} {id} not found")]
    NotFound {
        /// Entity kind ("candidate" or "job")
        kind: &'static str,
        /// Requested id
        id: i64,
    },

    /// Embedding length differs from the rest of its collection
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension already stored in the collection
        expected: usize,
        /// Dimension of the rejected embedding
        actual: usize,
    },

    /// A required field is missing or a constraint was violated
    #[error("persistence error: {0}")]
    Persistence(String),

    /// SQLite database error
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// Stored JSON column could not be read back
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General internal error
    #[error("{0}")]
    Internal(String),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db)
                if !matches!(db.kind(), sqlx::error::ErrorKind::Other) =>
            {
                Self::Persistence(db.message().to_string())
            }
            _ => Self::Database(err),
        }
    }
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;
