//! Local sentence-embedding provider backed by fastembed (ONNX runtime).
//!
//! The model is downloaded on first use and cached; afterwards it runs
//! offline. Inference is synchronous, so it runs on the blocking pool.

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};
use crate::provider::EmbeddingProvider;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

const DEFAULT_BATCH_SIZE: usize = 32;

/// Provider running a sentence-embedding model in-process
pub struct FastEmbedProvider {
    model: Arc<fastembed::TextEmbedding>,
    model_name: String,
    dimensions: usize,
    batch_size: usize,
}

/// Map a configured model name onto a fastembed model and its output size.
fn resolve_model(name: &str) -> Result<(fastembed::EmbeddingModel, usize)> {
    let normalized = name
        .trim()
        .trim_start_matches("sentence-transformers/")
        .to_ascii_lowercase();

    match normalized.as_str() {
        "all-minilm-l6-v2" => Ok((fastembed::EmbeddingModel::AllMiniLML6V2, 384)),
        "bge-small-en-v1.5" => Ok((fastembed::EmbeddingModel::BGESmallENV15, 384)),
        "nomic-embed-text-v1.5" => Ok((fastembed::EmbeddingModel::NomicEmbedTextV15, 768)),
        _ => Err(Error::NotConfigured(format!(
            "unsupported local model: {name}"
        ))),
    }
}

impl FastEmbedProvider {
    /// Load the model named in the `[embedding]` section.
    ///
    /// `SENTENCE_TRANSFORMER_MODEL` overrides the configured model name.
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self> {
        let name = std::env::var("SENTENCE_TRANSFORMER_MODEL")
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| config.model.clone());
        let (model, dimensions) = resolve_model(&name)?;

        info!("Initializing FastEmbed provider with model: {:?}", model);

        let init_options = fastembed::InitOptions::new(model).with_show_download_progress(true);
        let text_embedding = fastembed::TextEmbedding::try_new(init_options)
            .map_err(|e| Error::Provider(format!("Failed to initialize FastEmbed: {}", e)))?;

        info!(
            "FastEmbed provider initialized: {} ({} dimensions)",
            name, dimensions
        );

        Ok(Self {
            model: Arc::new(text_embedding),
            model_name: name,
            dimensions,
            batch_size: config.batch_size.unwrap_or(DEFAULT_BATCH_SIZE).max(1),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| Error::Provider("Empty embedding result".to_string()))
    }

    #[instrument(skip(self, texts), fields(batch_size = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let texts = texts.to_vec();
        let model = self.model.clone();
        let batch_size = self.batch_size;

        let embeddings = tokio::task::spawn_blocking(move || {
            model
                .embed(texts, Some(batch_size))
                .map_err(|e| Error::Provider(format!("Batch embedding failed: {}", e)))
        })
        .await
        .map_err(|e| Error::Provider(format!("Task join error: {}", e)))??;

        debug!("Generated {} embeddings", embeddings.len());
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "fastembed"
    }

    fn model(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_model_names() {
        assert_eq!(resolve_model("all-MiniLM-L6-v2").unwrap().1, 384);
        assert_eq!(
            resolve_model("sentence-transformers/all-MiniLM-L6-v2").unwrap().1,
            384
        );
        assert_eq!(resolve_model("nomic-embed-text-v1.5").unwrap().1, 768);
        assert!(matches!(
            resolve_model("gpt-2"),
            Err(Error::NotConfigured(_))
        ));
    }
}
