//! Backend selection: capability probe plus brute-force fallback.

use crate::brute::BruteForceIndex;
use crate::error::Result;
use crate::hits::SearchHits;
use crate::index::SimilarityIndex;
use crate::matrix::EmbeddingMatrix;
use crate::optimized::OptimizedIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Configured index preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IndexPreference {
    /// Probe usearch and use it when it works (default)
    #[default]
    Auto,
    /// Always try usearch first
    Usearch,
    /// Never touch usearch
    BruteForce,
}

/// The index implementation used for match queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBackend {
    /// usearch inner-product index, falling back to brute force on failure
    Optimized,
    /// Exhaustive ndarray scan
    BruteForce,
}

impl IndexBackend {
    /// Check whether a usearch index can be built and queried on this
    /// platform.
    pub fn probe() -> Self {
        let sample = match EmbeddingMatrix::from_rows(&[[1.0f32, 0.0], [0.0, 1.0]]) {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Index probe could not build its sample: {}", e);
                return Self::BruteForce;
            }
        };
        let query = EmbeddingMatrix::from_row(&[1.0, 0.0]);

        let outcome = OptimizedIndex::build(&sample).and_then(|index| index.search(&query, 1));
        match outcome {
            Ok(hits) if hits.first().and_then(|h| h.indices.first()) == Some(&0) => {
                info!("usearch available, using optimized index");
                Self::Optimized
            }
            Ok(hits) => {
                warn!(?hits, "usearch probe returned an unexpected result, using brute force");
                Self::BruteForce
            }
            Err(e) => {
                warn!("usearch unavailable ({}), using brute force", e);
                Self::BruteForce
            }
        }
    }

    /// Resolve a configured preference, probing when it is `Auto`.
    pub fn from_preference(preference: IndexPreference) -> Self {
        match preference {
            IndexPreference::Auto => Self::probe(),
            IndexPreference::Usearch => Self::Optimized,
            IndexPreference::BruteForce => Self::BruteForce,
        }
    }

    /// Backend name for logs and diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Optimized => "usearch",
            Self::BruteForce => "brute-force",
        }
    }

    /// Build the selected index over `references`.
    pub fn build(&self, references: &EmbeddingMatrix) -> Result<Box<dyn SimilarityIndex>> {
        match self {
            Self::Optimized => Ok(Box::new(OptimizedIndex::build(references)?)),
            Self::BruteForce => Ok(Box::new(BruteForceIndex::build(references))),
        }
    }

    /// Build an index over `references` and answer `queries`.
    ///
    /// When the optimized index fails to build or search, the same matrices
    /// are answered by [`BruteForceIndex`] instead. Dimension mismatches are
    /// caller errors and are returned as-is.
    pub fn query(
        &self,
        references: &EmbeddingMatrix,
        queries: &EmbeddingMatrix,
        top_k: usize,
    ) -> Result<Vec<SearchHits>> {
        if *self == Self::Optimized {
            return query_with(
                |refs| Ok(Box::new(OptimizedIndex::build(refs)?) as Box<dyn SimilarityIndex>),
                references,
                queries,
                top_k,
            );
        }

        debug!("Querying brute-force index");
        BruteForceIndex::build(references).search(queries, top_k)
    }
}

/// Search with the index made by `build`, answering from a brute-force scan
/// when it fails to build or search.
pub(crate) fn query_with<F>(
    build: F,
    references: &EmbeddingMatrix,
    queries: &EmbeddingMatrix,
    top_k: usize,
) -> Result<Vec<SearchHits>>
where
    F: FnOnce(&EmbeddingMatrix) -> Result<Box<dyn SimilarityIndex>>,
{
    match build(references).and_then(|index| index.search(queries, top_k)) {
        Ok(hits) => Ok(hits),
        Err(e) if e.is_backend_failure() => {
            warn!(error = %e, "Optimized index failed, falling back to brute force");
            BruteForceIndex::build(references).search(queries, top_k)
        }
        Err(e) => Err(e),
    }
}

impl fmt::Display for IndexBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_probe_finds_usearch() {
        assert_eq!(IndexBackend::probe(), IndexBackend::Optimized);
    }

    #[test]
    fn test_from_preference() {
        assert_eq!(
            IndexBackend::from_preference(IndexPreference::BruteForce),
            IndexBackend::BruteForce
        );
        assert_eq!(
            IndexBackend::from_preference(IndexPreference::Usearch),
            IndexBackend::Optimized
        );
    }

    #[test]
    fn test_preference_deserializes_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            backend: IndexPreference,
        }
        let parsed: Wrapper = serde_json::from_str(r#"{"backend":"brute-force"}"#).unwrap();
        assert_eq!(parsed.backend, IndexPreference::BruteForce);
    }

    #[test]
    fn test_query_shapes_match() {
        let refs = EmbeddingMatrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let query = EmbeddingMatrix::from_row(&[1.0, 0.2]);

        for backend in [IndexBackend::Optimized, IndexBackend::BruteForce] {
            let hits = backend.query(&refs, &query, 5).unwrap();
            assert_eq!(hits.len(), 1, "{backend}");
            assert_eq!(hits[0].indices, vec![0, 1], "{backend}");
        }
    }

    #[test]
    fn test_dimension_mismatch_is_not_swallowed() {
        let refs = EmbeddingMatrix::from_rows(&[vec![1.0, 0.0]]).unwrap();
        let query = EmbeddingMatrix::from_row(&[1.0, 0.0, 0.0]);

        let result = IndexBackend::Optimized.query(&refs, &query, 1);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    /// Index whose searches always fail with the given error.
    struct FailingIndex {
        error: fn() -> Error,
    }

    impl SimilarityIndex for FailingIndex {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn len(&self) -> usize {
            3
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn search(&self, _queries: &EmbeddingMatrix, _top_k: usize) -> Result<Vec<SearchHits>> {
            Err((self.error)())
        }
    }

    fn fallback_fixture() -> (EmbeddingMatrix, EmbeddingMatrix) {
        let refs =
            EmbeddingMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0], vec![0.7, 0.7]]).unwrap();
        let queries = EmbeddingMatrix::from_rows(&[vec![1.0, 0.1], vec![0.0, 2.0]]).unwrap();
        (refs, queries)
    }

    #[test]
    fn test_search_failure_falls_back_to_brute_force() {
        let (refs, queries) = fallback_fixture();

        let hits = query_with(
            |_| {
                Ok(Box::new(FailingIndex {
                    error: || Error::Search("boom".into()),
                }) as Box<dyn SimilarityIndex>)
            },
            &refs,
            &queries,
            2,
        )
        .unwrap();

        let expected = BruteForceIndex::build(&refs).search(&queries, 2).unwrap();
        assert_eq!(hits, expected);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].indices, vec![1, 2]);
    }

    #[test]
    fn test_build_failure_falls_back_to_brute_force() {
        let (refs, queries) = fallback_fixture();

        let hits = query_with(|_| Err(Error::Index("no backend".into())), &refs, &queries, 5).unwrap();

        let expected = BruteForceIndex::build(&refs).search(&queries, 5).unwrap();
        assert_eq!(hits, expected);
        assert_eq!(hits[0].len(), 3);
    }

    #[test]
    fn test_injected_dimension_mismatch_is_returned() {
        let (refs, queries) = fallback_fixture();

        let result = query_with(
            |_| {
                Ok(Box::new(FailingIndex {
                    error: || Error::DimensionMismatch {
                        expected: 2,
                        actual: 9,
                    },
                }) as Box<dyn SimilarityIndex>)
            },
            &refs,
            &queries,
            2,
        );
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 9
            })
        ));
    }

    #[test]
    fn test_build_boxed() {
        let refs = EmbeddingMatrix::from_rows(&[vec![1.0, 0.0]]).unwrap();
        let index = IndexBackend::BruteForce.build(&refs).unwrap();
        assert_eq!(index.name(), "brute-force");
        assert_eq!(index.len(), 1);
    }
}
