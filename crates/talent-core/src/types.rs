//! Inputs and outputs of the matching pipeline.

use serde::{Deserialize, Serialize};
use talent_store::Job;

/// A job posting as supplied for ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    /// Job title
    pub title: String,
    /// Job location
    #[serde(default)]
    pub location: Option<String>,
    /// Free-form requirements
    #[serde(default)]
    pub requirements: Option<String>,
}

impl JobPosting {
    /// Text embedded for this posting: `"{title}. Requirements: {requirements}"`.
    pub fn embedding_text(&self) -> String {
        format!(
            "{}. Requirements: {}",
            self.title,
            self.requirements.as_deref().unwrap_or("")
        )
    }
}

/// A resume after extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    /// Candidate name
    #[serde(default)]
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Preferred location
    #[serde(default)]
    pub location: Option<String>,
    /// Skill keywords
    #[serde(default)]
    pub skills: Vec<String>,
    /// Free-form work history
    #[serde(default)]
    pub experience_text: String,
}

impl ResumeRecord {
    /// Text embedded for this candidate: the skills line followed by the
    /// first `experience_chars` characters of the work history.
    pub fn embedding_text(&self, experience_chars: usize) -> String {
        let experience: String = self.experience_text.chars().take(experience_chars).collect();
        format!("Skills: {}\n{}", self.skills.join(", "), experience)
    }
}

/// One ranked job for a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    /// Job row id
    pub job_id: i64,
    /// Job title
    pub title: String,
    /// Job location
    pub location: Option<String>,
    /// Cosine similarity in `[-1, 1]`
    pub score: f32,
}

impl JobMatch {
    pub(crate) fn new(job: &Job, score: f32) -> Self {
        Self {
            job_id: job.id,
            title: job.title.clone(),
            location: job.location.clone(),
            score,
        }
    }
}
