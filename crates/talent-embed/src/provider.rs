//! The embedding provider abstraction and its factory.
//!
//! # Example
//!
//! ```ignore
//! use talent_embed::{provider_from_config, EmbeddingConfig};
//!
//! let provider = provider_from_config(&EmbeddingConfig::default())?;
//! let embedding = provider.embed("Python Developer").await?;
//! assert_eq!(embedding.len(), provider.dimensions());
//! ```

use crate::config::{EmbeddingConfig, ProviderKind};
use crate::error::Result;
use crate::hashing::HashingEmbedder;
use crate::openai::OpenAiEmbedder;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Trait for embedding providers
///
/// Embedding providers convert text into dense vectors such that related
/// texts have a high cosine similarity.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, in input order
    ///
    /// Default implementation calls `embed` for each text sequentially.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Get the embedding dimension
    fn dimensions(&self) -> usize;

    /// Get the provider name
    fn name(&self) -> &str;

    /// Get the model name
    fn model(&self) -> &str;
}

/// Wrapper for thread-safe embedding provider access
pub type SharedEmbeddingProvider = Arc<dyn EmbeddingProvider>;

/// Build the provider selected by `config`.
pub fn provider_from_config(config: &EmbeddingConfig) -> Result<SharedEmbeddingProvider> {
    let provider: SharedEmbeddingProvider = match config.provider {
        ProviderKind::Hashing => Arc::new(HashingEmbedder::new(config.dimensions)),
        ProviderKind::Openai => Arc::new(OpenAiEmbedder::from_config(config)?),
        ProviderKind::Local => local_provider(config)?,
    };

    info!(
        "Embedding provider ready: {} ({}, {} dims)",
        provider.name(),
        provider.model(),
        provider.dimensions()
    );
    Ok(provider)
}

#[cfg(feature = "local-model")]
fn local_provider(config: &EmbeddingConfig) -> Result<SharedEmbeddingProvider> {
    Ok(Arc::new(crate::local::FastEmbedProvider::from_config(
        config,
    )?))
}

#[cfg(not(feature = "local-model"))]
fn local_provider(_config: &EmbeddingConfig) -> Result<SharedEmbeddingProvider> {
    Err(crate::error::Error::NotConfigured(
        "local model support not enabled. Compile with --features local-model".to_string(),
    ))
}
