//! Ingestion: embed job postings and resumes, then persist them.

use crate::error::{Error, Result};
use crate::parser::ResumeParser;
use crate::types::{JobPosting, ResumeRecord};
use std::path::Path;
use talent_embed::SharedEmbeddingProvider;
use talent_store::{Candidate, Job, NewCandidate, NewJob, TalentStore};
use tracing::{info, instrument};

/// Characters of work history included in a candidate embedding
pub const DEFAULT_EXPERIENCE_CHARS: usize = 2000;

/// Embeds and stores jobs and candidates.
pub struct Ingestor {
    store: TalentStore,
    embedder: SharedEmbeddingProvider,
    experience_chars: usize,
}

impl Ingestor {
    /// Create an ingestor writing to `store`
    pub fn new(store: TalentStore, embedder: SharedEmbeddingProvider) -> Self {
        Self {
            store,
            embedder,
            experience_chars: DEFAULT_EXPERIENCE_CHARS,
        }
    }

    /// Limit the work history embedded per candidate
    pub fn with_experience_limit(mut self, chars: usize) -> Self {
        self.experience_chars = chars;
        self
    }

    /// Embed and store job postings in one batch. Either all postings are
    /// stored or none is.
    #[instrument(skip(self, postings), fields(count = postings.len()))]
    pub async fn ingest_jobs(&self, postings: &[JobPosting]) -> Result<Vec<Job>> {
        if postings.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = postings.iter().map(JobPosting::embedding_text).collect();
        let embeddings = self.embed_all(&texts).await?;

        let new_jobs: Vec<NewJob> = postings
            .iter()
            .zip(embeddings)
            .map(|(posting, embedding)| NewJob {
                title: posting.title.clone(),
                location: posting.location.clone(),
                requirements: posting.requirements.clone(),
                embedding,
            })
            .collect();

        let jobs = self.store.insert_jobs(&new_jobs).await?;
        info!("Ingested {} jobs", jobs.len());
        Ok(jobs)
    }

    /// Embed and store one candidate.
    #[instrument(skip(self, record), fields(name = %record.name))]
    pub async fn ingest_candidate(&self, record: &ResumeRecord) -> Result<Candidate> {
        let text = record.embedding_text(self.experience_chars);
        let embedding = self
            .embed_all(std::slice::from_ref(&text))
            .await?
            .pop()
            .ok_or_else(|| Error::Embedding("provider returned no vectors".to_string()))?;

        let candidate = self
            .store
            .insert_candidate(&NewCandidate {
                name: record.name.clone(),
                email: record.email.clone(),
                location: record.location.clone(),
                skills: record.skills.clone(),
                experience_text: record.experience_text.clone(),
                embedding,
            })
            .await?;

        info!("Stored candidate {} with id {}", candidate.name, candidate.id);
        Ok(candidate)
    }

    /// Parse a resume with `parser` and store the result. Nothing is stored
    /// when parsing fails.
    pub async fn ingest_resume(&self, parser: &dyn ResumeParser, path: &Path) -> Result<Candidate> {
        let record = parser.parse(path)?;
        self.ingest_candidate(&record).await
    }

    async fn embed_all(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let embeddings = self.embedder.embed_batch(texts).await?;
        if embeddings.len() != texts.len() {
            return Err(Error::Embedding(format!(
                "{} returned {} vectors for {} texts",
                self.embedder.name(),
                embeddings.len(),
                texts.len()
            )));
        }
        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MockResumeParser;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use talent_embed::{EmbeddingProvider, HashingEmbedder};

    /// Records calls and returns a fixed number of vectors.
    struct CountingEmbedder {
        calls: AtomicUsize,
        vectors: Option<usize>,
    }

    #[async_trait]
    impl EmbeddingProvider for CountingEmbedder {
        async fn embed(&self, _text: &str) -> talent_embed::Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> talent_embed::Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let n = self.vectors.unwrap_or(texts.len());
            Ok(vec![vec![1.0, 0.0]; n])
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "counting"
        }

        fn model(&self) -> &str {
            "test"
        }
    }

    fn counting(vectors: Option<usize>) -> Arc<CountingEmbedder> {
        Arc::new(CountingEmbedder {
            calls: AtomicUsize::new(0),
            vectors,
        })
    }

    fn posting(title: &str) -> JobPosting {
        JobPosting {
            title: title.into(),
            location: None,
            requirements: Some("Python".into()),
        }
    }

    #[tokio::test]
    async fn test_empty_jobs_skip_embedder() {
        let store = TalentStore::in_memory().await.unwrap();
        let embedder = counting(None);
        let ingestor = Ingestor::new(store, embedder.clone());

        assert!(ingestor.ingest_jobs(&[]).await.unwrap().is_empty());
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_jobs_embedded_in_one_batch() {
        let store = TalentStore::in_memory().await.unwrap();
        let embedder = counting(None);
        let ingestor = Ingestor::new(store.clone(), embedder.clone());

        let jobs = ingestor
            .ingest_jobs(&[posting("Python Developer"), posting("Chef")])
            .await
            .unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.job_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_vector_count_mismatch_is_embedding_error() {
        let store = TalentStore::in_memory().await.unwrap();
        let ingestor = Ingestor::new(store.clone(), counting(Some(1)));

        let result = ingestor
            .ingest_jobs(&[posting("Python Developer"), posting("Chef")])
            .await;

        assert!(matches!(result, Err(Error::Embedding(_))));
        assert_eq!(store.job_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_blank_title_is_persistence_error() {
        let store = TalentStore::in_memory().await.unwrap();
        let ingestor = Ingestor::new(store, Arc::new(HashingEmbedder::new(16)));

        let result = ingestor.ingest_jobs(&[posting(" ")]).await;
        assert!(matches!(result, Err(Error::Persistence(_))));
    }

    #[tokio::test]
    async fn test_parse_failure_stores_nothing() {
        let store = TalentStore::in_memory().await.unwrap();
        let embedder = counting(None);
        let ingestor = Ingestor::new(store.clone(), embedder.clone());

        let mut parser = MockResumeParser::new();
        parser
            .expect_parse()
            .times(1)
            .returning(|_| Err(Error::Parse("unreadable pdf".into())));

        let result = ingestor
            .ingest_resume(&parser, Path::new("resume.pdf"))
            .await;

        assert!(matches!(result, Err(Error::Parse(_))));
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.candidate_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_resume_ingested_through_parser() {
        let store = TalentStore::in_memory().await.unwrap();
        let ingestor = Ingestor::new(store.clone(), Arc::new(HashingEmbedder::new(32)));

        let mut parser = MockResumeParser::new();
        parser.expect_parse().returning(|_| {
            Ok(ResumeRecord {
                name: "Ada".into(),
                skills: vec!["python".into()],
                experience_text: "Backend services".into(),
                ..Default::default()
            })
        });

        let candidate = ingestor
            .ingest_resume(&parser, Path::new("ada.json"))
            .await
            .unwrap();

        assert_eq!(candidate.name, "Ada");
        assert_eq!(candidate.embedding.len(), 32);
        assert_eq!(store.get_candidate(candidate.id).await.unwrap(), candidate);
    }
}
