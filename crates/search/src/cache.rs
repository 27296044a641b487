use crate::tags::{normalize_tags, TagFilterMode};
use skills_loader::{GenerationCache, ScoredSkill};

/// Composite lookup key for ranked results.
///
/// Tags are normalized so `[B, a]` and `[a, b]` share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub query: String,
    pub tags: Vec<String>,
    pub top_k: usize,
    pub mode: TagFilterMode,
}

impl QueryKey {
    pub fn new(query: &str, tags: &[String], top_k: usize, mode: TagFilterMode) -> Self {
        Self {
            query: query.to_string(),
            tags: normalize_tags(tags),
            top_k,
            mode,
        }
    }
}

/// Ranked results per query, invalidated on every repository generation change
pub type QueryCache = GenerationCache<QueryKey, Vec<ScoredSkill>>;
