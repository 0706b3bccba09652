//! Application configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use talent_embed::EmbeddingConfig;
use talent_search::IndexPreference;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// Database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file; empty means the default location
    #[serde(default)]
    pub path: String,
}

impl DatabaseConfig {
    /// Configured path, or `~/.talent/talent.db`
    pub fn resolved_path(&self) -> PathBuf {
        if self.path.trim().is_empty() {
            talent_store::default_db_path()
        } else {
            PathBuf::from(&self.path)
        }
    }
}

/// Match search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub backend: IndexPreference,
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
}

fn default_top_k() -> usize {
    talent_core::DEFAULT_TOP_K
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend: IndexPreference::default(),
            default_top_k: default_top_k(),
        }
    }
}

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Characters of work history embedded per candidate
    #[serde(default = "default_experience_chars")]
    pub experience_chars: usize,
}

fn default_experience_chars() -> usize {
    talent_core::DEFAULT_EXPERIENCE_CHARS
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            experience_chars: default_experience_chars(),
        }
    }
}
