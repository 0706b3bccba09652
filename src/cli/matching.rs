//! `match`

use crate::app;
use anyhow::{Context, Result};
use talent_core::Error;

/// Exit status for an unknown candidate
const EXIT_NOT_FOUND: i32 = 2;

pub async fn run(candidate_id: i64, top_k: Option<usize>, json_only: bool) -> Result<()> {
    let config = app::load_config()?;
    let store = app::open_store(&config).await?;
    let top_k = top_k.unwrap_or(config.search.default_top_k);

    let candidate = match store.get_candidate(candidate_id).await {
        Ok(candidate) => candidate,
        Err(talent_store::Error::NotFound { .. }) => not_found(candidate_id),
        Err(e) => return Err(e).context("internal error"),
    };

    let matcher = app::matcher(&config, store);
    let matches = match matcher.match_candidate(candidate_id, top_k).await {
        Ok(matches) => matches,
        Err(Error::NotFound { .. }) => not_found(candidate_id),
        Err(e) => return Err(e).context("internal error"),
    };

    if !json_only {
        println!("\nCandidate Skills:");
        if candidate.skills.is_empty() {
            println!("No skills found.");
        }
        for skill in &candidate.skills {
            println!("- {skill}");
        }
        println!("\nMatched Jobs:");
    }

    if matches.is_empty() {
        eprintln!("no matches available");
    }
    println!("{}", serde_json::to_string_pretty(&matches)?);
    Ok(())
}

fn not_found(candidate_id: i64) -> ! {
    eprintln!("candidate {candidate_id} not found");
    std::process::exit(EXIT_NOT_FOUND)
}
