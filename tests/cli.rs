//! Drives the `talent` binary end to end against a temporary database.

use std::path::Path;
use std::process::{Command, Output};

fn talent(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_talent"))
        .args(args)
        .current_dir(dir)
        .env("TALENT_DATABASE__PATH", dir.join("talent.db"))
        .env("TALENT_SEARCH__BACKEND", "brute-force")
        .env("RUST_LOG", "error")
        .output()
        .expect("failed to run talent")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.display().to_string()
}

#[test]
fn test_ingest_and_match() {
    let dir = tempfile::tempdir().unwrap();
    let jobs = write(
        dir.path(),
        "jobs.json",
        r#"[{"title":"Chef","requirements":"Cooking, Baking"},
            {"title":"Python Developer","location":"Remote","requirements":"Python, SQL"}]"#,
    );
    let resume = write(
        dir.path(),
        "resume.json",
        r#"{"name":"Ada","skills":["python","sql"],"experience_text":"Python and SQL services"}"#,
    );

    let output = talent(dir.path(), &["ingest-jobs", &jobs]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Ingested 2 jobs.");

    let output = talent(dir.path(), &["ingest-resume", &resume]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Stored candidate Ada with id 1");

    let output = talent(dir.path(), &["match", "1", "--json"]);
    assert!(output.status.success());
    let matches: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let matches = matches.as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["title"], "Python Developer");
    assert_eq!(matches[0]["location"], "Remote");

    let output = talent(dir.path(), &["match", "1", "--top-k", "1"]);
    let text = stdout(&output);
    assert!(text.contains("Candidate Skills:"));
    assert!(text.contains("- python"));
    assert!(text.contains("Matched Jobs:"));
}

#[test]
fn test_unknown_candidate_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let output = talent(dir.path(), &["match", "42"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("candidate 42 not found"));
}

#[test]
fn test_no_jobs_prints_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let resume = write(dir.path(), "resume.json", r#"{"name":"Bo","skills":["rust"]}"#);
    assert!(talent(dir.path(), &["ingest-resume", &resume]).status.success());

    let output = talent(dir.path(), &["match", "1", "--json"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "[]");
    assert!(String::from_utf8_lossy(&output.stderr).contains("no matches available"));
}

#[test]
fn test_list_omits_embeddings() {
    let dir = tempfile::tempdir().unwrap();
    let jobs = write(dir.path(), "jobs.json", r#"[{"title":"Chef"}]"#);
    assert!(talent(dir.path(), &["ingest-jobs", &jobs]).status.success());

    let output = talent(dir.path(), &["list", "jobs"]);
    let listed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(listed[0]["title"], "Chef");
    assert!(listed[0].get("embedding").is_none());
}

#[test]
fn test_malformed_jobs_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let jobs = write(dir.path(), "jobs.json", r#"{"title":"not an array"}"#);

    let output = talent(dir.path(), &["ingest-jobs", &jobs]);
    assert_eq!(output.status.code(), Some(1));
}
