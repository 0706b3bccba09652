//! Application wiring: configuration and the shared services built from it.

pub mod config;
pub mod loader;

pub use config::AppConfig;
pub use loader::load_config;

use anyhow::{Context, Result};
use talent_core::{Ingestor, Matcher};
use talent_embed::{provider_from_config, SharedEmbeddingProvider};
use talent_search::IndexBackend;
use talent_store::TalentStore;
use tracing::info;

/// Open the configured store.
pub async fn open_store(config: &AppConfig) -> Result<TalentStore> {
    let path = config.database.resolved_path();
    TalentStore::from_path(&path)
        .await
        .with_context(|| format!("Failed to open database at {}", path.display()))
}

/// Build the configured embedding provider.
pub fn embedder(config: &AppConfig) -> Result<SharedEmbeddingProvider> {
    provider_from_config(&config.embedding).context("Failed to initialize embedding provider")
}

/// Build an ingestor over `store`.
pub fn ingestor(config: &AppConfig, store: TalentStore) -> Result<Ingestor> {
    Ok(Ingestor::new(store, embedder(config)?)
        .with_experience_limit(config.ingest.experience_chars))
}

/// Build a matcher over `store` using the configured index backend.
pub fn matcher(config: &AppConfig, store: TalentStore) -> Matcher {
    let backend = IndexBackend::from_preference(config.search.backend);
    info!("Using {} index backend", backend);
    Matcher::new(store, backend)
}
