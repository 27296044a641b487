use crate::cache::{QueryCache, QueryKey};
use crate::error::Result;
use crate::fuzzy::{fuzzy_score, FuzzyMatcher, FuzzyStrategy};
use crate::keyword::{keyword_score, InverseDocumentFrequency};
use crate::scoring::{relevance_score, PriorityBoost, ScoringWeights, Signals};
use crate::tags::{filter_by_tags, normalize_tags, tag_score, TagFilterMode};
use crate::tokenize::{Tokenizer, TokenizerStrategy};
use serde::{Deserialize, Serialize};
use skills_loader::{ScoredSkill, Skill, SkillRepository};
use std::sync::Arc;

pub const DEFAULT_TOP_K: usize = 5;

/// Retrieval tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
    pub weights: ScoringWeights,
    pub boost: PriorityBoost,
    pub tag_mode: TagFilterMode,
    /// Cached queries; 0 disables the cache
    pub cache_capacity: usize,
    pub tokenizer: TokenizerStrategy,
    pub fuzzy: FuzzyStrategy,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            boost: PriorityBoost::default(),
            tag_mode: TagFilterMode::default(),
            cache_capacity: 256,
            tokenizer: TokenizerStrategy::default(),
            fuzzy: FuzzyStrategy::default(),
        }
    }
}

/// Keyword, tag and fuzzy ranking over the current repository snapshot
pub struct SkillRetriever {
    repository: Arc<SkillRepository>,
    config: RetrieverConfig,
    tokenizer: Box<dyn Tokenizer>,
    fuzzy: Box<dyn FuzzyMatcher>,
    cache: QueryCache,
}

impl SkillRetriever {
    pub fn new(repository: Arc<SkillRepository>, config: RetrieverConfig) -> Result<Self> {
        config.weights.validate()?;
        Ok(Self {
            tokenizer: config.tokenizer.build(),
            fuzzy: config.fuzzy.build(),
            cache: QueryCache::new(config.cache_capacity),
            repository,
            config,
        })
    }

    pub fn repository(&self) -> &Arc<SkillRepository> {
        &self.repository
    }

    pub const fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }

    /// Rank skills for `query`, at most `top_k`, best first.
    ///
    /// `tags` pre-filter the candidates according to the configured mode.
    pub fn retrieve(&self, query: &str, tags: &[String], top_k: usize) -> Vec<ScoredSkill> {
        if query.trim().is_empty() || top_k == 0 {
            return Vec::new();
        }

        let snapshot = self.repository.snapshot();
        if snapshot.is_empty() {
            return Vec::new();
        }
        let generation = snapshot.generation();

        let tags = normalize_tags(tags);
        let key = QueryKey::new(query, &tags, top_k, self.config.tag_mode);
        if let Some(hit) = self.cache.get(generation, &key) {
            log::debug!("Query cache hit for '{query}' (generation {generation})");
            return hit;
        }

        let candidates = filter_by_tags(snapshot.skills(), &tags, self.config.tag_mode);
        let mut results = self.score_candidates(query, &tags, &candidates);
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);

        log::debug!(
            "Ranked {} of {} candidates for '{query}'",
            results.len(),
            candidates.len()
        );
        self.cache.insert(generation, key, results.clone());
        results
    }

    fn score_candidates(
        &self,
        query: &str,
        tags: &[String],
        candidates: &[Arc<Skill>],
    ) -> Vec<ScoredSkill> {
        let corpus: Vec<Vec<String>> = candidates
            .iter()
            .map(|skill| self.tokenizer.tokenize(&skill.content))
            .collect();
        let idf = InverseDocumentFrequency::from_corpus(&corpus);
        let query_tokens = self.tokenizer.tokenize(query);

        candidates
            .iter()
            .map(|skill| {
                let document = format!("{} {} {}", skill.content, skill.name, skill.description);
                let document_tokens = self.tokenizer.tokenize(&document);
                let signals = Signals {
                    keyword: keyword_score(&query_tokens, &document_tokens, &idf),
                    tag: tag_score(skill, tags),
                    fuzzy: fuzzy_score(self.fuzzy.as_ref(), query, skill),
                };
                let score = relevance_score(
                    skill.priority,
                    signals,
                    &self.config.weights,
                    &self.config.boost,
                );
                ScoredSkill::new(Arc::clone(skill), score)
            })
            .collect()
    }
}
