//! Search results for one query row.

/// Reserved score marking a result slot that holds no real match.
///
/// This is the most negative finite `f32`, which is what flat inner-product
/// indexes write into slots they could not fill.
pub const NO_MATCH_SCORE: f32 = f32::MIN;

/// Returns false for the sentinel and for non-finite scores.
pub fn is_valid_score(score: f32) -> bool {
    score.is_finite() && score != NO_MATCH_SCORE
}

/// Top-k results for a single query, as parallel arrays.
///
/// `indices[i]` is a row number in the reference matrix and `scores[i]` its
/// cosine similarity. Entries are sorted by descending score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    /// Reference row numbers
    pub indices: Vec<usize>,
    /// Similarity scores, parallel to `indices`
    pub scores: Vec<f32>,
}

/// A single valid `(index, score)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Reference row number
    pub index: usize,
    /// Cosine similarity
    pub score: f32,
}

impl SearchHits {
    /// Empty hits with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            scores: Vec::with_capacity(capacity),
        }
    }

    /// Append one entry
    pub fn push(&mut self, index: usize, score: f32) {
        self.indices.push(index);
        self.scores.push(score);
    }

    /// Number of slots, including any sentinel slots
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when there are no slots at all
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate valid neighbours in rank order, skipping sentinel slots.
    pub fn neighbors(&self) -> impl Iterator<Item = Neighbor> + '_ {
        self.indices
            .iter()
            .zip(self.scores.iter())
            .filter(|(_, score)| is_valid_score(**score))
            .map(|(&index, &score)| Neighbor { index, score })
    }
}
