//! The usearch index and the brute-force scan must agree on every query.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use talent_search::{
    BruteForceIndex, EmbeddingMatrix, IndexBackend, OptimizedIndex, SimilarityIndex,
};

const TOLERANCE: f32 = 1e-5;

fn random_matrix(rng: &mut StdRng, rows: usize, dimensions: usize) -> EmbeddingMatrix {
    let rows: Vec<Vec<f32>> = (0..rows)
        .map(|_| (0..dimensions).map(|_| rng.gen_range(-1.0f32..1.0)).collect())
        .collect();
    EmbeddingMatrix::from_rows_with_dimensions(&rows, dimensions).unwrap()
}

fn assert_same_hits(
    optimized: &dyn SimilarityIndex,
    brute: &dyn SimilarityIndex,
    queries: &EmbeddingMatrix,
    top_k: usize,
) {
    let fast = optimized.search(queries, top_k).unwrap();
    let slow = brute.search(queries, top_k).unwrap();
    assert_eq!(fast.len(), slow.len());

    for (query, (a, b)) in fast.iter().zip(slow.iter()).enumerate() {
        assert_eq!(a.indices, b.indices, "query {query}: rankings differ");
        for (x, y) in a.scores.iter().zip(b.scores.iter()) {
            assert!(
                (x - y).abs() < TOLERANCE,
                "query {query}: scores differ ({x} vs {y})"
            );
        }
    }
}

#[test]
fn test_optimized_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(7);

    for (n, dimensions, top_k) in [(1, 3, 1), (12, 8, 5), (40, 16, 10), (64, 32, 64)] {
        let references = random_matrix(&mut rng, n, dimensions);
        let queries = random_matrix(&mut rng, 4, dimensions);

        let optimized = OptimizedIndex::build(&references).unwrap();
        let brute = BruteForceIndex::build(&references);
        assert_same_hits(&optimized, &brute, &queries, top_k);
    }
}

#[test]
fn test_top_k_above_reference_count_returns_all() {
    let mut rng = StdRng::seed_from_u64(11);
    let references = random_matrix(&mut rng, 6, 12);
    let query = random_matrix(&mut rng, 1, 12);

    for backend in [IndexBackend::Optimized, IndexBackend::BruteForce] {
        let hits = backend.query(&references, &query, 25).unwrap();
        assert_eq!(hits[0].len(), 6, "{backend} must return every reference");
        assert_eq!(hits[0].neighbors().count(), 6);
    }
}

#[test]
fn test_no_references_returns_nothing() {
    let references = EmbeddingMatrix::empty(5);
    let query = EmbeddingMatrix::from_row(&[0.1, 0.2, 0.3, 0.4, 0.5]);

    for backend in [IndexBackend::Optimized, IndexBackend::BruteForce] {
        let hits = backend.query(&references, &query, 3).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].is_empty(), "{backend} should return no hits");
    }
}

#[test]
fn test_scores_descend() {
    let mut rng = StdRng::seed_from_u64(23);
    let references = random_matrix(&mut rng, 30, 10);
    let query = random_matrix(&mut rng, 1, 10);

    for backend in [IndexBackend::Optimized, IndexBackend::BruteForce] {
        let hits = backend.query(&references, &query, 30).unwrap();
        let scores = &hits[0].scores;
        assert!(
            scores.windows(2).all(|w| w[0] >= w[1]),
            "{backend} scores not sorted: {scores:?}"
        );
        assert!(scores.iter().all(|s| (-1.0 - TOLERANCE..=1.0 + TOLERANCE).contains(s)));
    }
}
