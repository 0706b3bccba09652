//! Talent Core - matching and ingestion
//!
//! Ties the store, the embedding providers and the similarity index
//! together:
//! - `Ingestor`: embeds job postings and resumes and stores them
//! - `Matcher`: ranks stored jobs for a stored candidate
//! - `ResumeParser`: the collaborator that turns documents into records
//!
//! # Example
//!
//! ```ignore
//! use talent_core::{Ingestor, Matcher, JobPosting};
//!
//! let ingestor = Ingestor::new(store.clone(), embedder);
//! ingestor.ingest_jobs(&postings).await?;
//! let candidate = ingestor.ingest_resume(&JsonResumeParser, path).await?;
//!
//! let matcher = Matcher::new(store, IndexBackend::probe());
//! let matches = matcher.match_candidate(candidate.id, 5).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod ingest;
pub mod matcher;
pub mod parser;
pub mod types;

pub use error::{Error, Result};
pub use ingest::{Ingestor, DEFAULT_EXPERIENCE_CHARS};
pub use matcher::{Matcher, DEFAULT_TOP_K};
pub use parser::{JsonResumeParser, ResumeParser, UNKNOWN_NAME};
pub use types::{JobMatch, JobPosting, ResumeRecord};
