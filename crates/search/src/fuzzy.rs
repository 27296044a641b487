use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32String};
use serde::{Deserialize, Serialize};
use skills_loader::Skill;
use std::sync::Mutex;

/// Normalized string similarity in [0, 1]
pub trait FuzzyMatcher: Send + Sync {
    fn ratio(&self, a: &str, b: &str) -> f32;
}

/// Indel similarity: `2·LCS(a, b) / (|a| + |b|)`, computed over chars.
///
/// Equivalent to `1 - indel_distance / (|a| + |b|)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndelRatio;

impl FuzzyMatcher for IndelRatio {
    fn ratio(&self, a: &str, b: &str) -> f32 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }
        let lcs = longest_common_subsequence(&a, &b);
        (2 * lcs) as f32 / total as f32
    }
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Fuzzy ratio from nucleo-matcher.
///
/// nucleo scores are unbounded, so a target's score is divided by the score
/// the query earns against itself and clamped to 1. Query words are plain
/// fuzzy atoms; `!`, `^`, `'` and `$` carry no pattern syntax.
pub struct NucleoRatio {
    matcher: Mutex<Matcher>,
}

impl NucleoRatio {
    pub fn new() -> Self {
        Self {
            matcher: Mutex::new(Matcher::new(nucleo_matcher::Config::DEFAULT)),
        }
    }
}

impl Default for NucleoRatio {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher for NucleoRatio {
    fn ratio(&self, a: &str, b: &str) -> f32 {
        if a.trim().is_empty() || b.trim().is_empty() {
            return 0.0;
        }
        let Ok(mut matcher) = self.matcher.lock() else {
            return 0.0;
        };
        let pattern = Pattern::new(
            a,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );

        let own = Utf32String::from(a);
        let Some(best) = pattern.score(own.slice(..), &mut matcher) else {
            return 0.0;
        };
        let target = Utf32String::from(b);
        let score = pattern.score(target.slice(..), &mut matcher).unwrap_or(0);
        if best == 0 {
            return 0.0;
        }
        (score as f32 / best as f32).min(1.0)
    }
}

/// Fuzzy matcher selection for configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuzzyStrategy {
    #[default]
    Indel,
    Nucleo,
}

impl FuzzyStrategy {
    pub fn build(self) -> Box<dyn FuzzyMatcher> {
        match self {
            Self::Indel => Box::new(IndelRatio),
            Self::Nucleo => Box::new(NucleoRatio::new()),
        }
    }
}

/// Best similarity of the query against the skill's name and source path
pub fn fuzzy_score(matcher: &dyn FuzzyMatcher, query: &str, skill: &Skill) -> f32 {
    if query.is_empty() {
        return 0.0;
    }
    let query = query.to_lowercase();
    let name_score = matcher.ratio(&query, &skill.name.to_lowercase());
    let path_score = matcher.ratio(&query, &skill.file_path.to_lowercase());
    name_score.max(path_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indel_ratio_bounds() {
        assert_eq!(IndelRatio.ratio("alpha", "alpha"), 1.0);
        assert_eq!(IndelRatio.ratio("abc", "xyz"), 0.0);
        assert_eq!(IndelRatio.ratio("", ""), 1.0);
        assert_eq!(IndelRatio.ratio("abc", ""), 0.0);
    }

    #[test]
    fn indel_ratio_matches_lcs_formula() {
        // LCS("alpha", "alpha-skill") = 5 → 10 / 16
        let ratio = IndelRatio.ratio("alpha", "alpha-skill");
        assert!((ratio - 0.625).abs() < 1e-6);
    }

    #[test]
    fn fuzzy_score_takes_best_of_name_and_path() {
        let skill = Skill::new("docker", "c", "/skills/kubernetes/SKILL.md");
        let by_name = fuzzy_score(&IndelRatio, "Docker", &skill);
        assert_eq!(by_name, 1.0);

        let by_path = fuzzy_score(&IndelRatio, "/skills/kubernetes/skill.md", &skill);
        assert_eq!(by_path, 1.0);
    }

    #[test]
    fn empty_query_scores_zero() {
        let skill = Skill::new("docker", "c", "/d/SKILL.md");
        assert_eq!(fuzzy_score(&IndelRatio, "", &skill), 0.0);
        assert_eq!(fuzzy_score(&NucleoRatio::new(), "", &skill), 0.0);
    }

    #[test]
    fn nucleo_ratio_prefers_closer_targets() {
        let matcher = NucleoRatio::new();
        let exact = matcher.ratio("fastapi", "fastapi");
        let partial = matcher.ratio("fastapi", "fast-api-routing");
        let none = matcher.ratio("fastapi", "zzz");

        assert!((exact - 1.0).abs() < 1e-6);
        assert!(partial <= exact);
        assert_eq!(none, 0.0);
    }

    #[test]
    fn nucleo_ratio_treats_operators_literally() {
        let matcher = NucleoRatio::new();
        for query in ["!important", "^deploy", "'quoted", "build$", "c++ !no-cache"] {
            let own = matcher.ratio(query, query);
            assert!((own - 1.0).abs() < 1e-6, "{query} scored {own} against itself");
        }
        assert!(matcher.ratio("deploy services", "deploy-services") > 0.0);
    }
}
