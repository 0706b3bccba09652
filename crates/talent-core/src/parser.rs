//! Resume parsing collaborator.
//!
//! Text extraction from PDFs or other documents happens outside this crate;
//! a [`ResumeParser`] turns whatever it produced into a [`ResumeRecord`].

use crate::error::{Error, Result};
use crate::types::ResumeRecord;
use std::path::Path;
use tracing::debug;

/// Name used when the source has none
pub const UNKNOWN_NAME: &str = "Unknown";

/// Turns a resume document into a structured record.
#[cfg_attr(test, mockall::automock)]
pub trait ResumeParser: Send + Sync {
    /// Parse the document at `path`.
    fn parse(&self, path: &Path) -> Result<ResumeRecord>;
}

/// Reads records already extracted to JSON:
/// `{"name", "email", "location", "skills": [..], "experience_text"}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonResumeParser;

impl JsonResumeParser {
    /// Parse a record from an in-memory JSON string.
    pub fn parse_str(&self, text: &str) -> Result<ResumeRecord> {
        let mut record: ResumeRecord =
            serde_json::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;

        record.name = record.name.trim().to_string();
        if record.name.is_empty() {
            record.name = UNKNOWN_NAME.to_string();
        }
        record.skills = record
            .skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(record)
    }
}

impl ResumeParser for JsonResumeParser {
    fn parse(&self, path: &Path) -> Result<ResumeRecord> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Parse(format!("{}: {}", path.display(), e)))?;
        let record = self.parse_str(&text)?;
        debug!("Parsed resume for {} from {}", record.name, path.display());
        Ok(record)
    }
}
