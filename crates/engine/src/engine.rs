use crate::config::{EmbeddingBackend, EngineConfig};
use crate::error::{EngineError, Result};
use skills_context::{
    build_context, counter_for_model, sort_by_priority, TokenCounter, DEFAULT_TOKEN_MODEL,
};
use skills_loader::{ScoredSkill, Skill, SkillRepository, SkillWatcher};
use skills_search::{HybridRetriever, SkillRetriever};
use skills_vector_store::{
    EmbeddingProvider, HashEmbedder, InMemoryVectorStore, OpenAiEmbedder, VectorStore,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Assembles a [`SkillsEngine`] from configuration and optional backends
pub struct SkillsEngineBuilder {
    config: EngineConfig,
    root: PathBuf,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    store: Option<Arc<dyn VectorStore>>,
}

impl SkillsEngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            root: PathBuf::from("."),
            embedder: None,
            store: None,
        }
    }

    /// Base for the default skill directories
    #[must_use]
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    #[must_use]
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    #[must_use]
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Fill in the embedder and store named by the configuration when vector
    /// search is enabled and none were supplied
    pub fn with_configured_backends(mut self) -> Result<Self> {
        if !self.config.enable_vector_search {
            return Ok(self);
        }
        if self.embedder.is_none() {
            let embedding = &self.config.embedding;
            let embedder: Arc<dyn EmbeddingProvider> = match embedding.backend {
                EmbeddingBackend::Hash => Arc::new(HashEmbedder::new(embedding.dimension)),
                EmbeddingBackend::OpenAi => {
                    Arc::new(OpenAiEmbedder::new(embedding.openai.clone())?)
                }
            };
            self.embedder = Some(embedder);
        }
        if self.store.is_none() {
            self.store = Some(Arc::new(InMemoryVectorStore::new()));
        }
        Ok(self)
    }

    pub fn build(self) -> Result<SkillsEngine> {
        self.config.validate()?;

        let skill_dirs = self.config.resolve_skill_dirs(&self.root);
        let repository = Arc::new(SkillRepository::new(self.config.retrieval.cache_capacity));
        let retriever = Arc::new(SkillRetriever::new(
            Arc::clone(&repository),
            self.config.retrieval.clone(),
        )?);

        let hybrid = if self.config.enable_vector_search {
            let embedder = self
                .embedder
                .ok_or(EngineError::VectorSearchUnavailable("an embedding provider"))?;
            let store = self
                .store
                .ok_or(EngineError::VectorSearchUnavailable("a vector store"))?;
            log::info!("Vector search enabled ({})", embedder.model_id());
            Some(HybridRetriever::new(Arc::clone(&retriever), store, embedder))
        } else {
            None
        };

        let counter = counter_for_model(self.config.token_model.as_deref());

        Ok(SkillsEngine {
            config: self.config,
            skill_dirs,
            repository,
            retriever,
            hybrid,
            counter,
        })
    }
}

/// Skill retrieval and context composition over one repository
pub struct SkillsEngine {
    config: EngineConfig,
    skill_dirs: Vec<PathBuf>,
    repository: Arc<SkillRepository>,
    retriever: Arc<SkillRetriever>,
    hybrid: Option<HybridRetriever>,
    counter: Box<dyn TokenCounter>,
}

impl SkillsEngine {
    pub fn builder(config: EngineConfig) -> SkillsEngineBuilder {
        SkillsEngineBuilder::new(config)
    }

    /// Engine with the backends named by `config`, skill dirs relative to `root`
    pub fn from_config(config: EngineConfig, root: &Path) -> Result<Self> {
        Self::builder(config)
            .root(root)
            .with_configured_backends()?
            .build()
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn skill_dirs(&self) -> &[PathBuf] {
        &self.skill_dirs
    }

    pub fn repository(&self) -> &Arc<SkillRepository> {
        &self.repository
    }

    pub const fn vector_search_enabled(&self) -> bool {
        self.hybrid.is_some()
    }

    /// Rescan the configured directories
    pub fn reload(&self) -> Vec<Arc<Skill>> {
        self.repository.reload(&self.skill_dirs)
    }

    pub fn list_skills(&self) -> Vec<Arc<Skill>> {
        self.repository.list()
    }

    pub fn get_skill(&self, name: &str) -> Option<Arc<Skill>> {
        self.repository.get(name)
    }

    /// Rank skills for `query`.
    ///
    /// Vector fusion applies only when enabled and no tags are requested.
    pub async fn retrieve_skills(
        &self,
        query: &str,
        tags: &[String],
        top_k: Option<usize>,
    ) -> Result<Vec<ScoredSkill>> {
        let top_k = top_k.unwrap_or(self.config.default_top_k);
        match &self.hybrid {
            Some(hybrid) if tags.is_empty() => Ok(hybrid.retrieve(query, top_k).await?),
            _ => Ok(self.retriever.retrieve(query, tags, top_k)),
        }
    }

    /// Context text for `query` plus the names of the skills it was built from,
    /// in rendering order
    pub async fn build_skills_context(
        &self,
        query: &str,
        tags: &[String],
        top_k: Option<usize>,
        max_tokens: Option<usize>,
        model: Option<&str>,
    ) -> Result<(String, Vec<String>)> {
        let ranked = self.retrieve_skills(query, tags, top_k).await?;
        if ranked.is_empty() {
            return Ok((String::new(), Vec::new()));
        }

        let max_tokens = max_tokens.unwrap_or(self.config.default_max_tokens);
        let context = match model {
            Some(model) if !self.shares_counter(Some(model)) => {
                build_context(&ranked, max_tokens, counter_for_model(Some(model)).as_ref())
            }
            _ => build_context(&ranked, max_tokens, self.counter.as_ref()),
        };
        let names = sort_by_priority(&ranked)
            .iter()
            .map(|item| item.name().to_string())
            .collect();
        Ok((context, names))
    }

    /// Whether the engine's own counter already counts for `model`
    fn shares_counter(&self, model: Option<&str>) -> bool {
        let own = self.config.token_model.as_deref().unwrap_or(DEFAULT_TOKEN_MODEL);
        model.map_or(true, |model| model == own)
    }

    /// Reload the repository whenever a skill document changes.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn watch(&self) -> Result<SkillWatcher> {
        let repository = Arc::clone(&self.repository);
        let dirs = self.skill_dirs.clone();
        let mut watcher = SkillWatcher::new(self.skill_dirs.clone());
        watcher.start(move |path| {
            log::info!("Skill document changed: {}", path.display());
            repository.reload(&dirs);
        })?;
        Ok(watcher)
    }
}
