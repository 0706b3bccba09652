//! Talent Store - candidate and job persistence
//!
//! Stores candidate profiles and job postings, each with its embedding,
//! in SQLite via `sqlx`. Embeddings are kept as JSON arrays together with
//! their dimension, and every row in a collection must share it.
//!
//! ```text
//! NewCandidate / NewJob ──► TalentStore (SQLite) ──► Candidate / Job
//!                               │
//!                     encode/decode_embedding
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod store;
pub mod types;

pub use codec::{decode_embedding, encode_embedding};
pub use error::{Error, Result};
pub use store::{default_db_path, TalentStore};
pub use types::{Candidate, Collection, Job, NewCandidate, NewJob};
