//! `doctor`: configuration and environment diagnostics

use crate::app::{self, AppConfig};
use std::path::Path;
use talent_search::{IndexBackend, IndexPreference};

pub async fn run() -> anyhow::Result<()> {
    println!("🏥 Talent Doctor\n");

    let config = match app::load_config() {
        Ok(config) => {
            println!("Checking configuration... ✅ Loaded");
            config
        }
        Err(e) => {
            println!("Checking configuration... ❌ {e:#}");
            std::process::exit(1);
        }
    };

    let mut all_ok = true;

    check_env_file();
    all_ok &= check_database(&config).await;
    all_ok &= check_embedder(&config);
    check_index_backend(&config);

    println!();
    if all_ok {
        println!("✅ All checks passed! Ready to match.");
    } else {
        println!("⚠️  Some checks failed. Please fix the issues above.");
        std::process::exit(1);
    }

    Ok(())
}

fn check_env_file() {
    print!("Checking .env file... ");

    if Path::new(".env").exists() {
        println!("✅ Found");
    } else {
        println!("ℹ️  Not found (using config files and environment only)");
    }
}

async fn check_database(config: &AppConfig) -> bool {
    let path = config.database.resolved_path();
    print!("Checking database... ");

    if !path.exists() {
        println!("ℹ️  {} will be created on first ingest", path.display());
        return true;
    }

    match app::open_store(config).await {
        Ok(store) => {
            let jobs = store.job_count().await;
            let candidates = store.candidate_count().await;
            match (jobs, candidates) {
                (Ok(jobs), Ok(candidates)) => {
                    println!("✅ {}", path.display());
                    println!("  {jobs} jobs, {candidates} candidates");
                    true
                }
                (Err(e), _) | (_, Err(e)) => {
                    println!("❌ {}: {e}", path.display());
                    false
                }
            }
        }
        Err(e) => {
            println!("❌ {e:#}");
            false
        }
    }
}

fn check_embedder(config: &AppConfig) -> bool {
    print!("Checking embedding provider ({})... ", config.embedding.provider);

    match app::embedder(config) {
        Ok(provider) => {
            println!(
                "✅ {} / {} ({} dimensions)",
                provider.name(),
                provider.model(),
                provider.dimensions()
            );
            true
        }
        Err(e) => {
            println!("❌ {e:#}");
            false
        }
    }
}

fn check_index_backend(config: &AppConfig) {
    print!("Checking index backend... ");

    let probed = IndexBackend::probe();
    let selected = IndexBackend::from_preference(config.search.backend);
    match (config.search.backend, probed) {
        (_, IndexBackend::Optimized) => println!("✅ usearch available, using {selected}"),
        (IndexPreference::Usearch, IndexBackend::BruteForce) => {
            println!("⚠️  usearch requested but unavailable, queries fall back to brute force")
        }
        (_, IndexBackend::BruteForce) => {
            println!("ℹ️  usearch unavailable, using brute force")
        }
    }
}
