//! Persisted records and their insert forms.
//!
//! Records are immutable once stored; ids are assigned by SQLite.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored candidate profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Row id
    pub id: i64,
    /// Display name (never blank)
    pub name: String,
    /// Contact email
    pub email: Option<String>,
    /// Preferred location
    pub location: Option<String>,
    /// Skill keywords in extraction order
    pub skills: Vec<String>,
    /// Free-form work history
    pub experience_text: String,
    /// Profile embedding
    #[serde(skip_serializing)]
    #[serde(default)]
    pub embedding: Vec<f32>,
    /// Insert time
    pub created_at: DateTime<Utc>,
}

/// A stored job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Row id
    pub id: i64,
    /// Job title (never blank)
    pub title: String,
    /// Job location
    pub location: Option<String>,
    /// Free-form requirements
    pub requirements: Option<String>,
    /// Posting embedding
    #[serde(skip_serializing)]
    #[serde(default)]
    pub embedding: Vec<f32>,
    /// Insert time
    pub created_at: DateTime<Utc>,
}

/// Candidate fields supplied on insert.
#[derive(Debug, Clone, Default)]
pub struct NewCandidate {
    /// Display name
    pub name: String,
    /// Contact email
    pub email: Option<String>,
    /// Preferred location
    pub location: Option<String>,
    /// Skill keywords
    pub skills: Vec<String>,
    /// Free-form work history
    pub experience_text: String,
    /// Profile embedding
    pub embedding: Vec<f32>,
}

/// Job fields supplied on insert.
#[derive(Debug, Clone, Default)]
pub struct NewJob {
    /// Job title
    pub title: String,
    /// Job location
    pub location: Option<String>,
    /// Free-form requirements
    pub requirements: Option<String>,
    /// Posting embedding
    pub embedding: Vec<f32>,
}

/// The two stored collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// `candidates` table
    Candidates,
    /// `jobs` table
    Jobs,
}

impl Collection {
    /// Table name
    pub fn table(self) -> &'static str {
        match self {
            Self::Candidates => "candidates",
            Self::Jobs => "jobs",
        }
    }

    /// Singular noun used in errors
    pub fn kind(self) -> &'static str {
        match self {
            Self::Candidates => "candidate",
            Self::Jobs => "job",
        }
    }
}
