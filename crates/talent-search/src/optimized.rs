//! Inner-product index on unit vectors, backed by usearch.
//!
//! References are L2-normalised before insertion, so the inner product that
//! usearch ranks by equals cosine similarity. usearch reports inner-product
//! *distance* as `1 - dot`, which is converted back to a score here.

use crate::error::{Error, Result};
use crate::hits::SearchHits;
use crate::index::{check_query_dimensions, empty_hits, SimilarityIndex};
use crate::matrix::{l2_normalize_rows, EmbeddingMatrix};
use tracing::{debug, info, instrument};
use usearch::ffi::{IndexOptions, MetricKind, ScalarKind};

/// Graph connectivity
const CONNECTIVITY: usize = 16;
/// Expansion factor for add operations
const EXPANSION_ADD: usize = 128;
/// Lower bound on the search beam; raised to the reference count so small
/// per-request indexes are searched exhaustively.
const MIN_EXPANSION_SEARCH: usize = 64;

/// usearch-backed similarity index keyed by reference row number.
pub struct OptimizedIndex {
    /// `None` when built from zero references
    index: Option<usearch::Index>,
    len: usize,
    dimensions: usize,
}

impl OptimizedIndex {
    /// Normalise the references and load them into a fresh usearch index.
    #[instrument(skip(references), fields(vectors = references.len(), dims = references.dimensions()))]
    pub fn build(references: &EmbeddingMatrix) -> Result<Self> {
        let len = references.len();
        let dimensions = references.dimensions();

        if len == 0 {
            return Ok(Self {
                index: None,
                len,
                dimensions,
            });
        }

        let options = IndexOptions {
            dimensions,
            metric: MetricKind::IP,
            quantization: ScalarKind::F32,
            connectivity: CONNECTIVITY,
            expansion_add: EXPANSION_ADD,
            expansion_search: len.max(MIN_EXPANSION_SEARCH),
            multi: false,
        };

        let index = usearch::Index::new(&options)
            .map_err(|e| Error::Index(format!("Failed to create index: {}", e)))?;

        index
            .reserve(len)
            .map_err(|e| Error::Index(format!("Failed to reserve capacity: {}", e)))?;

        let mut normalized = references.as_array().clone();
        l2_normalize_rows(&mut normalized, 0.0);

        for (row_number, row) in normalized.rows().into_iter().enumerate() {
            let vector = row.to_vec();
            index
                .add(row_number as u64, &vector)
                .map_err(|e| Error::Index(format!("Failed to add vector: {}", e)))?;
        }

        info!("Built usearch index: {} vectors, {} dims", len, dimensions);

        Ok(Self {
            index: Some(index),
            len,
            dimensions,
        })
    }
}

impl SimilarityIndex for OptimizedIndex {
    fn name(&self) -> &'static str {
        "usearch"
    }

    fn len(&self) -> usize {
        self.len
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[instrument(skip(self, queries), fields(queries = queries.len(), top_k = top_k))]
    fn search(&self, queries: &EmbeddingMatrix, top_k: usize) -> Result<Vec<SearchHits>> {
        check_query_dimensions(self, queries)?;

        let index = match &self.index {
            Some(index) if top_k > 0 => index,
            _ => return Ok(empty_hits(queries)),
        };

        let mut normalized = queries.as_array().clone();
        l2_normalize_rows(&mut normalized, 0.0);

        let mut all_hits = Vec::with_capacity(queries.len());
        for row in normalized.rows() {
            let query = row.to_vec();
            let matches = index
                .search(&query, top_k)
                .map_err(|e| Error::Search(format!("Search failed: {}", e)))?;

            let mut hits = SearchHits::with_capacity(matches.keys.len());
            for (key, distance) in matches.keys.iter().zip(matches.distances.iter()) {
                let row_number = *key as usize;
                // Keys outside the reference range are unfilled slots
                if row_number >= self.len {
                    continue;
                }
                hits.push(row_number, 1.0 - distance);
            }
            all_hits.push(hits);
        }

        debug!("Answered {} queries from usearch index", all_hits.len());
        Ok(all_hits)
    }
}
