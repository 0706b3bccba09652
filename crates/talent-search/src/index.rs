//! The similarity index interface shared by every backend.

use crate::error::{Error, Result};
use crate::hits::SearchHits;
use crate::matrix::EmbeddingMatrix;

/// Answers cosine top-k queries against a fixed set of reference vectors.
///
/// Implementations are built once from an [`EmbeddingMatrix`] and never
/// mutated afterwards.
pub trait SimilarityIndex: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Number of reference vectors
    fn len(&self) -> usize;

    /// Reference vector dimension
    fn dimensions(&self) -> usize;

    /// True when the index holds no references
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the `top_k` best references for each query row.
    ///
    /// The result has one [`SearchHits`] per query row. When `top_k` exceeds
    /// the number of references every reference is returned, never padded.
    fn search(&self, queries: &EmbeddingMatrix, top_k: usize) -> Result<Vec<SearchHits>>;
}

/// Reject queries whose width differs from a non-empty index.
pub(crate) fn check_query_dimensions(
    index: &dyn SimilarityIndex,
    queries: &EmbeddingMatrix,
) -> Result<()> {
    if !index.is_empty() && queries.dimensions() != index.dimensions() {
        return Err(Error::DimensionMismatch {
            expected: index.dimensions(),
            actual: queries.dimensions(),
        });
    }
    Ok(())
}

/// One empty [`SearchHits`] per query row.
pub(crate) fn empty_hits(queries: &EmbeddingMatrix) -> Vec<SearchHits> {
    vec![SearchHits::default(); queries.len()]
}
