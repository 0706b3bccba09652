use super::TalentStore;
use crate::codec::{decode_embedding, encode_embedding};
use crate::error::{Error, Result};
use crate::types::{Candidate, Collection, Job, NewCandidate, NewJob};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::{debug, instrument};

/// Reject embeddings the similarity index cannot use.
fn validate_embedding(embedding: &[f32], kind: &str) -> Result<()> {
    if embedding.is_empty() {
        return Err(Error::Persistence(format!("{kind} embedding is empty")));
    }
    if embedding.iter().any(|v| !v.is_finite()) {
        return Err(Error::Persistence(format!(
            "{kind} embedding contains non-finite values"
        )));
    }
    Ok(())
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("corrupt created_at {text:?}: {e}")))
}

/// Dimension already used by `collection`, if it has any rows.
async fn stored_dimensions<'e, E>(executor: E, collection: Collection) -> Result<Option<usize>>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let sql = format!("SELECT dimensions FROM {} LIMIT 1", collection.table());
    let row = sqlx::query(&sql).fetch_optional(executor).await?;
    Ok(row
        .map(|r| r.try_get::<i64, _>("dimensions"))
        .transpose()?
        .map(|d| d as usize))
}

fn check_dimensions(expected: Option<usize>, actual: usize) -> Result<()> {
    match expected {
        Some(expected) if expected != actual => Err(Error::DimensionMismatch { expected, actual }),
        _ => Ok(()),
    }
}

impl TalentStore {
    // ── Candidates ──────────────────────────────────────────────

    /// Persist a candidate and return it with its assigned id.
    #[instrument(skip(self, candidate), fields(name = %candidate.name))]
    pub async fn insert_candidate(&self, candidate: &NewCandidate) -> Result<Candidate> {
        if candidate.name.trim().is_empty() {
            return Err(Error::Persistence("candidate name is required".to_string()));
        }
        validate_embedding(&candidate.embedding, "candidate")?;
        let dimensions = candidate.embedding.len();

        let mut tx = self.pool.begin().await?;
        check_dimensions(
            stored_dimensions(&mut *tx, Collection::Candidates).await?,
            dimensions,
        )?;

        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO candidates
             (name, email, location, skills, experience_text, embedding, dimensions, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(&candidate.location)
        .bind(serde_json::to_string(&candidate.skills)?)
        .bind(&candidate.experience_text)
        .bind(encode_embedding(&candidate.embedding))
        .bind(dimensions as i64)
        .bind(created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let id = result.last_insert_rowid();
        debug!("Stored candidate {} ({} dims)", id, dimensions);

        Ok(Candidate {
            id,
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            location: candidate.location.clone(),
            skills: candidate.skills.clone(),
            experience_text: candidate.experience_text.clone(),
            embedding: candidate.embedding.clone(),
            created_at,
        })
    }

    /// Get a candidate by id.
    pub async fn get_candidate(&self, id: i64) -> Result<Candidate> {
        let row = sqlx::query(
            "SELECT id, name, email, location, skills, experience_text, embedding, created_at
             FROM candidates WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_candidate(&row),
            None => Err(Error::NotFound {
                kind: Collection::Candidates.kind(),
                id,
            }),
        }
    }

    /// All candidates ordered by id.
    pub async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        let rows = sqlx::query(
            "SELECT id, name, email, location, skills, experience_text, embedding, created_at
             FROM candidates ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_candidate).collect()
    }

    /// Number of stored candidates.
    pub async fn candidate_count(&self) -> Result<u64> {
        self.count(Collection::Candidates).await
    }

    pub(crate) fn row_to_candidate(row: &SqliteRow) -> Result<Candidate> {
        let skills: String = row.try_get("skills")?;
        let embedding: String = row.try_get("embedding")?;
        let created_str: String = row.try_get("created_at")?;
        Ok(Candidate {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            location: row.try_get("location")?,
            skills: serde_json::from_str(&skills)?,
            experience_text: row.try_get("experience_text")?,
            embedding: decode_embedding(&embedding)?,
            created_at: parse_timestamp(&created_str)?,
        })
    }

    // ── Jobs ────────────────────────────────────────────────────

    /// Persist a single job.
    pub async fn insert_job(&self, job: &NewJob) -> Result<Job> {
        let mut jobs = self.insert_jobs(std::slice::from_ref(job)).await?;
        jobs.pop()
            .ok_or_else(|| Error::Internal("job insert returned no rows".to_string()))
    }

    /// Persist a batch of jobs in one transaction. Either every job is
    /// stored or none is.
    #[instrument(skip(self, jobs), fields(count = jobs.len()))]
    pub async fn insert_jobs(&self, jobs: &[NewJob]) -> Result<Vec<Job>> {
        if jobs.is_empty() {
            return Ok(Vec::new());
        }

        for job in jobs {
            if job.title.trim().is_empty() {
                return Err(Error::Persistence("job title is required".to_string()));
            }
            validate_embedding(&job.embedding, "job")?;
        }

        let mut tx = self.pool.begin().await?;

        let mut expected = stored_dimensions(&mut *tx, Collection::Jobs).await?;
        let created_at = Utc::now();
        let mut stored = Vec::with_capacity(jobs.len());

        for job in jobs {
            let dimensions = job.embedding.len();
            check_dimensions(expected, dimensions)?;
            expected = Some(dimensions);

            let result = sqlx::query(
                "INSERT INTO jobs
                 (title, location, requirements, embedding, dimensions, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(&job.title)
            .bind(&job.location)
            .bind(&job.requirements)
            .bind(encode_embedding(&job.embedding))
            .bind(dimensions as i64)
            .bind(created_at.to_rfc3339())
            .execute(&mut *tx)
            .await?;

            stored.push(Job {
                id: result.last_insert_rowid(),
                title: job.title.clone(),
                location: job.location.clone(),
                requirements: job.requirements.clone(),
                embedding: job.embedding.clone(),
                created_at,
            });
        }

        tx.commit().await?;
        debug!("Stored {} jobs", stored.len());
        Ok(stored)
    }

    /// Get a job by id.
    pub async fn get_job(&self, id: i64) -> Result<Job> {
        let row = sqlx::query(
            "SELECT id, title, location, requirements, embedding, created_at
             FROM jobs WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_job(&row),
            None => Err(Error::NotFound {
                kind: Collection::Jobs.kind(),
                id,
            }),
        }
    }

    /// All jobs ordered by id.
    pub async fn list_jobs(&self) -> Result<Vec<Job>> {
        let rows = sqlx::query(
            "SELECT id, title, location, requirements, embedding, created_at
             FROM jobs ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_job).collect()
    }

    /// Number of stored jobs.
    pub async fn job_count(&self) -> Result<u64> {
        self.count(Collection::Jobs).await
    }

    pub(crate) fn row_to_job(row: &SqliteRow) -> Result<Job> {
        let embedding: String = row.try_get("embedding")?;
        let created_str: String = row.try_get("created_at")?;
        Ok(Job {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            location: row.try_get("location")?,
            requirements: row.try_get("requirements")?,
            embedding: decode_embedding(&embedding)?,
            created_at: parse_timestamp(&created_str)?,
        })
    }

    // ── Stats ───────────────────────────────────────────────────

    async fn count(&self, collection: Collection) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) as cnt FROM {}", collection.table());
        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;
        Ok(row.try_get::<i64, _>("cnt")? as u64)
    }
}
