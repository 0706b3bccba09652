//! CLI module for Talent
//!
//! Commands:
//! - `ingest-jobs`: embed and store job postings from a JSON file
//! - `ingest-resume`: embed and store a parsed resume
//! - `match`: rank stored jobs for a candidate
//! - `list`: print stored jobs or candidates
//! - `doctor`: configuration and environment diagnostics

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod doctor;
pub mod ingest;
pub mod list;
pub mod matching;

/// Talent CLI
#[derive(Parser, Debug)]
#[command(name = "talent")]
#[command(about = "Match candidate resumes to job postings")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Embed and store job postings from a JSON array file
    IngestJobs {
        /// JSON file of `{title, location?, requirements?}` objects
        file: PathBuf,
    },
    /// Embed and store a candidate from a parsed resume record
    IngestResume {
        /// JSON file of `{name, email?, location?, skills, experience_text}`
        file: PathBuf,
    },
    /// Rank stored jobs for a candidate
    Match {
        /// Candidate id
        candidate_id: i64,
        /// Number of jobs to return (default from config)
        #[arg(long)]
        top_k: Option<usize>,
        /// Print only the JSON array of matches
        #[arg(long)]
        json: bool,
    },
    /// List stored records
    List {
        #[arg(value_enum)]
        what: ListTarget,
    },
    /// Run diagnostics
    Doctor,
}

/// Collections printable by `list`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListTarget {
    Jobs,
    Candidates,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::IngestJobs { file }) => ingest::jobs(&file).await,
        Some(Commands::IngestResume { file }) => ingest::resume(&file).await,
        Some(Commands::Match {
            candidate_id,
            top_k,
            json,
        }) => matching::run(candidate_id, top_k, json).await,
        Some(Commands::List { what }) => list::run(what).await,
        Some(Commands::Doctor) => doctor::run().await,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
