//! Talent Embed - text embedding providers
//!
//! Turns job and candidate text into fixed-length vectors:
//! - `HashingEmbedder`: deterministic feature hashing, offline (default)
//! - `OpenAiEmbedder`: OpenAI-compatible `/embeddings` endpoint
//! - `FastEmbedProvider`: local sentence-embedding model (`local-model` feature)
//!
//! All providers implement [`EmbeddingProvider`]; use
//! [`provider_from_config`] to build the one selected by configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hashing;
#[cfg(feature = "local-model")]
pub mod local;
pub mod openai;
pub mod provider;

pub use config::{EmbeddingConfig, ProviderKind, DEFAULT_DIMENSIONS, DEFAULT_MODEL};
pub use error::{Error, Result};
pub use hashing::HashingEmbedder;
#[cfg(feature = "local-model")]
pub use local::FastEmbedProvider;
pub use openai::OpenAiEmbedder;
pub use provider::{provider_from_config, EmbeddingProvider, SharedEmbeddingProvider};
