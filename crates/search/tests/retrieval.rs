use pretty_assertions::assert_eq;
use skills_loader::SkillRepository;
use skills_search::{RetrieverConfig, SkillRetriever, TagFilterMode};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write_skill(root: &Path, dir: &str, body: &str) {
    let base = root.join(dir);
    std::fs::create_dir_all(&base).expect("create skill dir");
    std::fs::write(base.join("SKILL.md"), body).expect("write skill");
}

fn seed(root: &Path) {
    write_skill(
        root,
        "alpha",
        "---\nname: alpha-skill\ntags: [alpha, test]\npriority: high\n---\nHello world\n",
    );
    write_skill(
        root,
        "beta",
        concat!(
            "---\nname: beta-skill\ndescription: Beta skill\ntags: [fastapi, api]\n---\n",
            "FastAPI routing guidance.\n",
        ),
    );
    write_skill(
        root,
        "gamma",
        concat!(
            "---\nname: gamma-skill\ntags: [python, api]\npriority: low\n---\n",
            "Python packaging and virtual environments.\n",
        ),
    );
}

fn retriever_for(dir: &Path, config: RetrieverConfig) -> SkillRetriever {
    let repository = Arc::new(SkillRepository::default());
    repository.reload(&[dir.to_path_buf()]);
    SkillRetriever::new(repository, config).expect("valid config")
}

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|t| t.to_string()).collect()
}

#[test]
fn alpha_scenario() {
    let temp = TempDir::new().expect("tempdir");
    seed(temp.path());
    let retriever = retriever_for(temp.path(), RetrieverConfig::default());

    let results = retriever.retrieve("alpha", &[], 1);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name(), "alpha-skill");
    assert!(results[0].score > 0.0);
}

#[test]
fn beta_scenario_ranks_keyword_match_first() {
    let temp = TempDir::new().expect("tempdir");
    seed(temp.path());
    let retriever = retriever_for(temp.path(), RetrieverConfig::default());

    let results = retriever.retrieve("fastapi endpoints", &[], 3);
    assert_eq!(results[0].name(), "beta-skill");
}

#[test]
fn results_are_bounded_and_sorted() {
    let temp = TempDir::new().expect("tempdir");
    seed(temp.path());
    let retriever = retriever_for(temp.path(), RetrieverConfig::default());

    for top_k in 1..=4 {
        let results = retriever.retrieve("api guidance", &[], top_k);
        assert!(results.len() <= top_k);
        assert!(results.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }
    assert_eq!(retriever.retrieve("api guidance", &[], 10).len(), 3);
}

#[test]
fn reload_invalidates_cached_rankings() {
    let temp = TempDir::new().expect("tempdir");
    seed(temp.path());
    let repository = Arc::new(SkillRepository::default());
    repository.reload(&[temp.path().to_path_buf()]);
    let retriever =
        SkillRetriever::new(Arc::clone(&repository), RetrieverConfig::default()).expect("config");

    let before = retriever.retrieve("fastapi endpoints", &[], 3);
    assert_eq!(before[0].name(), "beta-skill");

    let replacement = TempDir::new().expect("tempdir");
    write_skill(
        replacement.path(),
        "delta",
        "---\nname: delta-skill\n---\nFastAPI endpoints and dependency injection.\n",
    );
    repository.reload(&[replacement.path().to_path_buf()]);

    let after = retriever.retrieve("fastapi endpoints", &[], 3);
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].name(), "delta-skill");
}

#[test]
fn tag_filter_modes() {
    let temp = TempDir::new().expect("tempdir");
    seed(temp.path());

    let any = retriever_for(temp.path(), RetrieverConfig::default());
    let mut names: Vec<String> = any
        .retrieve("guide", &tags(&["API", "alpha"]), 5)
        .into_iter()
        .map(|r| r.name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["alpha-skill", "beta-skill", "gamma-skill"]);

    let all = retriever_for(
        temp.path(),
        RetrieverConfig {
            tag_mode: TagFilterMode::All,
            ..RetrieverConfig::default()
        },
    );
    let names: Vec<String> = all
        .retrieve("guide", &tags(&["api", "Python"]), 5)
        .into_iter()
        .map(|r| r.name().to_string())
        .collect();
    assert_eq!(names, vec!["gamma-skill"]);
}

#[test]
fn filtered_out_skills_never_appear() {
    let temp = TempDir::new().expect("tempdir");
    seed(temp.path());
    let retriever = retriever_for(temp.path(), RetrieverConfig::default());

    let results = retriever.retrieve("hello world", &tags(&["fastapi"]), 5);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name(), "beta-skill");
}
