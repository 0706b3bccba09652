//! Embedding provider configuration (the `[embedding]` config section).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default model name, shared by the local and hashing providers
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// Default dimension (MiniLM-L6 output size)
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Which embedding backend to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Deterministic feature hashing, offline (default)
    #[default]
    Hashing,
    /// OpenAI-compatible `/embeddings` HTTP endpoint
    Openai,
    /// Local sentence-embedding model (requires the `local-model` feature)
    Local,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hashing => write!(f, "hashing"),
            Self::Openai => write!(f, "openai"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Embedding configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider to use
    #[serde(default)]
    pub provider: ProviderKind,
    /// Model name (provider specific)
    #[serde(default = "default_model")]
    pub model: String,
    /// Output dimension for the hashing provider
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
    /// Texts per request / inference batch (provider default when unset)
    #[serde(default)]
    pub batch_size: Option<usize>,
    /// Base URL for the HTTP provider
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key for the HTTP provider (falls back to `OPENAI_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_dimensions() -> usize {
    DEFAULT_DIMENSIONS
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: default_model(),
            dimensions: default_dimensions(),
            batch_size: None,
            base_url: default_base_url(),
            api_key: None,
        }
    }
}

impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("dimensions", &self.dimensions)
            .field("batch_size", &self.batch_size)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
