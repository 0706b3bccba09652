//! Talent Search - cosine top-k similarity indexes
//!
//! This crate answers "which reference vectors are closest to this query"
//! for the matcher:
//! - `EmbeddingMatrix`: an `(n × D)` stack of embeddings
//! - `SimilarityIndex`: the shared search interface
//! - `OptimizedIndex`: usearch inner-product index on unit vectors
//! - `BruteForceIndex`: exhaustive ndarray scan
//! - `IndexBackend`: capability probe and transparent fallback
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Job embeddings (n × D)          Candidate embedding (1 × D)│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  IndexBackend::query                                        │
//! │  ├─ OptimizedIndex (usearch, IP on normalised rows)         │
//! │  └─ BruteForceIndex (fallback, stable top-k)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  SearchHits: indices[], scores[] per query                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use talent_search::{EmbeddingMatrix, IndexBackend};
//!
//! let jobs = EmbeddingMatrix::from_rows(&job_embeddings)?;
//! let query = EmbeddingMatrix::from_row(&candidate_embedding);
//!
//! let backend = IndexBackend::probe();
//! let hits = backend.query(&jobs, &query, 5)?;
//! for neighbor in hits[0].neighbors() {
//!     println!("{}: score={:.3}", neighbor.index, neighbor.score);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod brute;
pub mod error;
pub mod hits;
pub mod index;
pub mod matrix;
pub mod optimized;

pub use backend::{IndexBackend, IndexPreference};
pub use brute::BruteForceIndex;
pub use error::{Error, Result};
pub use hits::{is_valid_score, Neighbor, SearchHits, NO_MATCH_SCORE};
pub use index::SimilarityIndex;
pub use matrix::EmbeddingMatrix;
pub use optimized::OptimizedIndex;
