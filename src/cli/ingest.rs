//! `ingest-jobs` and `ingest-resume`

use crate::app;
use anyhow::{Context, Result};
use std::path::Path;
use talent_core::{JobPosting, JsonResumeParser};

pub async fn jobs(file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let postings: Vec<JobPosting> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of job postings", file.display()))?;

    let config = app::load_config()?;
    let store = app::open_store(&config).await?;
    let ingestor = app::ingestor(&config, store)?;

    let jobs = ingestor.ingest_jobs(&postings).await?;
    println!("Ingested {} jobs.", jobs.len());
    Ok(())
}

pub async fn resume(file: &Path) -> Result<()> {
    let config = app::load_config()?;
    let store = app::open_store(&config).await?;
    let ingestor = app::ingestor(&config, store)?;

    let candidate = ingestor.ingest_resume(&JsonResumeParser, file).await?;
    println!("Stored candidate {} with id {}", candidate.name, candidate.id);
    Ok(())
}
