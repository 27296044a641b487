use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_skill(root: &Path, dir: &str, body: &str) {
    let base = root.join(dir);
    fs::create_dir_all(&base).unwrap();
    fs::write(base.join("SKILL.md"), body).unwrap();
}

fn setup_skills() -> tempfile::TempDir {
    let temp = tempdir().unwrap();
    let skills = temp.path().join(".opencode/skills");
    write_skill(
        &skills,
        "alpha",
        "---\nname: alpha-skill\ntags: [alpha, test]\npriority: high\n---\nHello world\n",
    );
    write_skill(
        &skills,
        "beta",
        concat!(
            "---\nname: beta-skill\ndescription: FastAPI notes\ntags: [fastapi, api]\n---\n",
            "FastAPI routing guidance.\n",
        ),
    );
    temp
}

#[allow(deprecated)]
fn skills_cmd(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("skills").expect("binary");
    cmd.current_dir(workdir)
        .env_remove("SKILLS_DIRS")
        .env_remove("SKILLS_ENABLE_VECTOR_SEARCH")
        .env_remove("SKILLS_TOKEN_MODEL")
        .arg("--quiet");
    cmd
}

fn run_json(workdir: &Path, args: &[&str]) -> Value {
    let output = skills_cmd(workdir)
        .arg("--json")
        .args(args)
        .output()
        .expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn list_reads_default_directories() {
    let temp = setup_skills();
    let body = run_json(temp.path(), &["list"]);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|skill| skill["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alpha-skill", "beta-skill"]);
    assert_eq!(body[0]["priority"], "high");
}

#[test]
fn query_ranks_keyword_match_first() {
    let temp = setup_skills();
    let body = run_json(temp.path(), &["query", "fastapi endpoints", "--top-k", "3"]);
    assert_eq!(body[0]["name"], "beta-skill");
    assert!(body.as_array().unwrap().len() <= 3);
}

#[test]
fn query_respects_tag_filter() {
    let temp = setup_skills();
    let body = run_json(temp.path(), &["query", "hello", "--tag", "fastapi"]);
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "beta-skill");
}

#[test]
fn context_reports_skill_names() {
    let temp = setup_skills();
    let body = run_json(
        temp.path(),
        &["context", "fastapi", "--max-tokens", "200"],
    );
    assert_eq!(body["skills"][0], "alpha-skill");
    assert!(body["context"]
        .as_str()
        .unwrap()
        .starts_with("## Skill: alpha-skill"));
}

#[test]
fn explicit_dir_overrides_defaults() {
    let temp = setup_skills();
    let other = tempdir().unwrap();
    write_skill(other.path(), "gamma", "---\nname: gamma-skill\n---\nGamma\n");

    let body = run_json(
        temp.path(),
        &["--dir", other.path().to_str().unwrap(), "list"],
    );
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "gamma-skill");
}

#[test]
fn text_output_for_context() {
    let temp = setup_skills();
    skills_cmd(temp.path())
        .args(["context", "fastapi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Source:"))
        .stdout(predicate::str::contains("FastAPI routing guidance."));
}

#[test]
fn missing_config_file_fails() {
    let temp = setup_skills();
    skills_cmd(temp.path())
        .args(["--config", "does-not-exist.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}
