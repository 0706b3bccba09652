//! OpenAI-compatible HTTP embedding provider.

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};
use crate::provider::EmbeddingProvider;
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::sync::OnceLock;
use tracing::{debug, info, instrument};

/// Default remote model
pub const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// Texts per request when the config does not say otherwise
pub const DEFAULT_BATCH_SIZE: usize = 16;

/// Provider calling `POST {base_url}/embeddings`
pub struct OpenAiEmbedder {
    api_key: String,
    base_url: String,
    model: String,
    batch_size: usize,
    observed_dimensions: OnceLock<usize>,
    client: reqwest::Client,
}

impl fmt::Debug for OpenAiEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiEmbedder")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl OpenAiEmbedder {
    /// Create a provider with an explicit key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: DEFAULT_MODEL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            observed_dimensions: OnceLock::new(),
            client: reqwest::Client::new(),
        }
    }

    /// Build from the `[embedding]` section, reading `OPENAI_API_KEY` when no
    /// key is configured.
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                Error::NotConfigured("OPENAI_API_KEY is not set".to_string())
            })?;

        // The local MiniLM default makes no sense remotely
        let model = if config.model == crate::config::DEFAULT_MODEL {
            DEFAULT_MODEL.to_string()
        } else {
            config.model.clone()
        };

        Ok(Self::new(api_key)
            .with_base_url(&config.base_url)
            .with_model(model)
            .with_batch_size(config.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)))
    }

    /// Set the base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the number of texts per request (at least 1)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    async fn request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let body = serde_json::json!({
            "input": texts,
            "model": self.model,
        });

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(Error::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("{status}: {error_text}")));
        }

        let mut parsed: EmbeddingsResponse = response.json().await?;
        if parsed.data.len() != texts.len() {
            return Err(Error::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        // The API may return items out of order
        parsed.data.sort_by_key(|item| item.index);
        if let Some(first) = parsed.data.first() {
            let _ = self.observed_dimensions.set(first.embedding.len());
        }
        Ok(parsed.data.into_iter().map(|item| item.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.request(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| Error::InvalidResponse("No embedding in response".to_string()))
    }

    #[instrument(skip(self, texts), fields(batch_size = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.batch_size) {
            debug!("Requesting {} embeddings from {}", chunk.len(), self.model);
            embeddings.extend(self.request(chunk).await?);
        }

        info!("Generated {} embeddings", embeddings.len());
        Ok(embeddings)
    }

    /// Length of the vectors the endpoint returned. Before the first
    /// response this is a guess from the model name.
    fn dimensions(&self) -> usize {
        if let Some(&observed) = self.observed_dimensions.get() {
            return observed;
        }
        match self.model.as_str() {
            "text-embedding-3-large" => 3072,
            _ => 1536,
        }
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
    index: usize,
}
