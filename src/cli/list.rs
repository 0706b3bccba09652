//! `list jobs|candidates`

use super::ListTarget;
use crate::app;
use anyhow::Result;

pub async fn run(what: ListTarget) -> Result<()> {
    let config = app::load_config()?;
    let store = app::open_store(&config).await?;

    // Embeddings are skipped by the records' serializers
    let output = match what {
        ListTarget::Jobs => serde_json::to_string_pretty(&store.list_jobs().await?)?,
        ListTarget::Candidates => serde_json::to_string_pretty(&store.list_candidates().await?)?,
    };
    println!("{output}");
    Ok(())
}
