//! Candidate-to-job matching.
//!
//! Every request loads the candidate and all jobs, builds a fresh index over
//! the job embeddings, and ranks jobs by cosine similarity. Nothing is
//! written and the index is dropped afterwards.

use crate::error::Result;
use crate::types::JobMatch;
use talent_search::{EmbeddingMatrix, IndexBackend, SearchHits};
use talent_store::{Candidate, Job, TalentStore};
use tracing::{debug, info, instrument};

/// Results returned when the caller does not ask for a count
pub const DEFAULT_TOP_K: usize = 5;

/// Ranks stored jobs for a stored candidate.
pub struct Matcher {
    store: TalentStore,
    backend: IndexBackend,
}

impl Matcher {
    /// Create a matcher reading from `store` and searching with `backend`
    pub fn new(store: TalentStore, backend: IndexBackend) -> Self {
        Self { store, backend }
    }

    /// Index backend used for queries
    pub fn backend(&self) -> IndexBackend {
        self.backend
    }

    /// Best `top_k` jobs for the candidate, highest score first.
    ///
    /// Returns fewer than `top_k` matches when fewer jobs exist, and an
    /// empty list when there are none.
    #[instrument(skip(self))]
    pub async fn match_candidate(&self, candidate_id: i64, top_k: usize) -> Result<Vec<JobMatch>> {
        let candidate = self.store.get_candidate(candidate_id).await?;
        let jobs = self.store.list_jobs().await?;
        if jobs.is_empty() {
            info!("No jobs stored, nothing to match");
            return Ok(Vec::new());
        }

        self.rank(&candidate, &jobs, top_k)
    }

    /// Rank `jobs` against `candidate` without touching the store.
    pub fn rank(&self, candidate: &Candidate, jobs: &[Job], top_k: usize) -> Result<Vec<JobMatch>> {
        let dimensions = candidate.embedding.len();
        let rows: Vec<&[f32]> = jobs.iter().map(|job| job.embedding.as_slice()).collect();
        let references = EmbeddingMatrix::from_rows_with_dimensions(&rows, dimensions)?;
        let query = EmbeddingMatrix::from_row(&candidate.embedding);

        let hits = self.backend.query(&references, &query, top_k)?;
        let matches = hits
            .first()
            .map(|hits| collect_matches(hits, jobs))
            .unwrap_or_default();

        debug!(
            "Matched candidate {} against {} jobs with {}: {} results",
            candidate.id,
            jobs.len(),
            self.backend,
            matches.len()
        );
        Ok(matches)
    }
}

/// Map valid hits back to jobs, keeping hit order. Sentinel scores and
/// indices past the job list are dropped.
fn collect_matches(hits: &SearchHits, jobs: &[Job]) -> Vec<JobMatch> {
    hits.neighbors()
        .filter_map(|n| jobs.get(n.index).map(|job| JobMatch::new(job, n.score)))
        .collect()
}
