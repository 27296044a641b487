use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use skills_search::RetrieverConfig;
use skills_vector_store::OpenAiConfig;
use std::path::{Path, PathBuf};

pub const ENV_ENABLE_VECTOR_SEARCH: &str = "SKILLS_ENABLE_VECTOR_SEARCH";
pub const ENV_TOKEN_MODEL: &str = "SKILLS_TOKEN_MODEL";
pub const ENV_SKILL_DIRS: &str = "SKILLS_DIRS";

/// Where query and skill embeddings come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Deterministic feature hashing, no network
    #[default]
    Hash,
    /// OpenAI-compatible `/embeddings` endpoint
    OpenAi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    /// Vector size of the hash backend
    pub dimension: usize,
    pub openai: OpenAiConfig,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::default(),
            dimension: 384,
            openai: OpenAiConfig::default(),
        }
    }
}

/// Engine settings, usually read from a TOML file.
///
/// ```toml
/// skill_dirs = [".opencode/skill", ".opencode/skills"]
/// enable_vector_search = false
/// token_model = "gpt-4"
///
/// [retrieval]
/// tag_mode = "any"
/// cache_capacity = 256
///
/// [retrieval.weights]
/// keyword = 0.6
/// tag = 0.2
/// fuzzy = 0.2
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directories scanned for skills; empty means the defaults under `.`
    pub skill_dirs: Vec<PathBuf>,
    pub retrieval: RetrieverConfig,
    pub enable_vector_search: bool,
    /// Model whose tokenizer measures context budgets
    pub token_model: Option<String>,
    pub default_top_k: usize,
    pub default_max_tokens: usize,
    pub embedding: EmbeddingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            skill_dirs: Vec::new(),
            retrieval: RetrieverConfig::default(),
            enable_vector_search: false,
            token_model: None,
            default_top_k: skills_search::DEFAULT_TOP_K,
            default_max_tokens: 2000,
            embedding: EmbeddingConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Apply `SKILLS_*` overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_env(|key| std::env::var(key).ok());
        self
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(ENV_ENABLE_VECTOR_SEARCH) {
            self.enable_vector_search = parse_flag(&raw);
        }
        if let Some(model) = lookup(ENV_TOKEN_MODEL) {
            let model = model.trim();
            if !model.is_empty() {
                self.token_model = Some(model.to_string());
            }
        }
        if let Some(raw) = lookup(ENV_SKILL_DIRS) {
            let dirs: Vec<PathBuf> = std::env::split_paths(&raw)
                .filter(|dir| !dir.as_os_str().is_empty())
                .collect();
            if !dirs.is_empty() {
                self.skill_dirs = dirs;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.retrieval
            .weights
            .validate()
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;

        let boost = &self.retrieval.boost;
        if ![boost.high, boost.medium, boost.low]
            .iter()
            .all(|value| value.is_finite())
        {
            return Err(EngineError::InvalidConfig(
                "priority boosts must be finite".to_string(),
            ));
        }
        if self.default_max_tokens == 0 {
            return Err(EngineError::InvalidConfig(
                "default_max_tokens must be positive".to_string(),
            ));
        }
        if self.embedding.backend == EmbeddingBackend::Hash && self.embedding.dimension == 0 {
            return Err(EngineError::InvalidConfig(
                "embedding.dimension must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Configured directories, or the defaults under `root` when none are set
    pub fn resolve_skill_dirs(&self, root: &Path) -> Vec<PathBuf> {
        if self.skill_dirs.is_empty() {
            skills_loader::default_skill_dirs(root)
        } else {
            self.skill_dirs.clone()
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true")
}
