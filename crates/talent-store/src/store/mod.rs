//! TalentStore: SQLite persistence for candidates and jobs.

use crate::error::{Error, Result};

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod crud;
mod migrations;


/// SQLite-backed candidate and job store.
#[derive(Clone)]
pub struct TalentStore {
    pub(crate) pool: SqlitePool,
}

impl TalentStore {
    /// Open (or create) a store at the given path.
    pub async fn from_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::Internal(format!("mkdir: {e}")))?;
        }
        let url = format!("sqlite:{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        // Enable WAL for read/write concurrency
        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&pool)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!("Talent store initialized at {}", db_path.display());
        Ok(store)
    }

    /// In-memory store (for tests).
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.run_migrations().await?;
        debug!("In-memory talent store initialized");
        Ok(store)
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Default database location: `~/.talent/talent.db`, or `.talent/talent.db`
/// when no home directory is known.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".talent"))
        .unwrap_or_else(|| PathBuf::from(".talent"))
        .join("talent.db")
}
