//! Exhaustive cosine search over a normalised matrix.

use crate::error::Result;
use crate::hits::SearchHits;
use crate::index::{check_query_dimensions, empty_hits, SimilarityIndex};
use crate::matrix::{l2_normalize_rows, EmbeddingMatrix};
use ndarray::Array2;
use tracing::{debug, instrument};

/// Added to every norm so zero vectors normalise to zero instead of NaN.
pub const NORM_EPSILON: f32 = 1e-9;

/// Brute-force index: one matrix product per query batch.
///
/// Equal scores keep ascending reference order.
pub struct BruteForceIndex {
    references: Array2<f32>,
}

impl BruteForceIndex {
    /// Normalise the references and keep them for scanning.
    pub fn build(references: &EmbeddingMatrix) -> Self {
        let mut data = references.as_array().clone();
        l2_normalize_rows(&mut data, NORM_EPSILON);
        debug!(
            "Built brute-force index: {} vectors, {} dims",
            data.nrows(),
            data.ncols()
        );
        Self { references: data }
    }
}

impl SimilarityIndex for BruteForceIndex {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn len(&self) -> usize {
        self.references.nrows()
    }

    fn dimensions(&self) -> usize {
        self.references.ncols()
    }

    #[instrument(skip(self, queries), fields(queries = queries.len(), top_k = top_k))]
    fn search(&self, queries: &EmbeddingMatrix, top_k: usize) -> Result<Vec<SearchHits>> {
        check_query_dimensions(self, queries)?;

        let n = self.len();
        if n == 0 || top_k == 0 {
            return Ok(empty_hits(queries));
        }

        let mut normalized = queries.as_array().clone();
        l2_normalize_rows(&mut normalized, NORM_EPSILON);

        // (m × n) cosine matrix
        let similarities = normalized.dot(&self.references.t());
        let k = top_k.min(n);

        let hits = similarities
            .rows()
            .into_iter()
            .map(|row| {
                let mut order: Vec<usize> = (0..n).collect();
                // sort_by is stable, so ties keep ascending index order
                order.sort_by(|&a, &b| row[b].total_cmp(&row[a]));
                order.truncate(k);

                let mut hits = SearchHits::with_capacity(k);
                for index in order {
                    hits.push(index, row[index]);
                }
                hits
            })
            .collect();

        Ok(hits)
    }
}
