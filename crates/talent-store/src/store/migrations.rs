use super::TalentStore;
use crate::error::Result;

impl TalentStore {
    // ── Migrations ──────────────────────────────────────────────

    pub(crate) async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS candidates (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                name            TEXT NOT NULL CHECK (length(trim(name)) > 0),
                email           TEXT,
                location        TEXT,
                skills          TEXT NOT NULL DEFAULT '[]',
                experience_text TEXT NOT NULL DEFAULT '',
                embedding       TEXT NOT NULL,
                dimensions      INTEGER NOT NULL CHECK (dimensions > 0),
                created_at      TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS jobs (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                title        TEXT NOT NULL CHECK (length(trim(title)) > 0),
                location     TEXT,
                requirements TEXT,
                embedding    TEXT NOT NULL,
                dimensions   INTEGER NOT NULL CHECK (dimensions > 0),
                created_at   TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
