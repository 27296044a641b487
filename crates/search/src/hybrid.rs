use crate::error::Result;
use crate::retriever::SkillRetriever;
use skills_loader::{ScoredSkill, Skill};
use skills_vector_store::{EmbeddingProvider, VectorStore};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Keyword retrieval fused with embedding similarity.
///
/// The vector store mirrors one repository generation at a time. It is
/// rebuilt lazily on the first query after a reload.
pub struct HybridRetriever {
    retriever: Arc<SkillRetriever>,
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    indexed_generation: Mutex<Option<u64>>,
}

impl HybridRetriever {
    pub fn new(
        retriever: Arc<SkillRetriever>,
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            retriever,
            store,
            embedder,
            indexed_generation: Mutex::new(None),
        }
    }

    pub fn retriever(&self) -> &Arc<SkillRetriever> {
        &self.retriever
    }

    pub async fn indexed_generation(&self) -> Option<u64> {
        *self.indexed_generation.lock().await
    }

    /// Push `skills` to the vector store as `generation`.
    ///
    /// Returns `false` without touching the store when that generation is
    /// already indexed or there is nothing to index.
    pub async fn index_skills(&self, generation: u64, skills: &[Arc<Skill>]) -> Result<bool> {
        let mut indexed = self.indexed_generation.lock().await;
        if *indexed == Some(generation) || skills.is_empty() {
            return Ok(false);
        }

        let ids: Vec<String> = skills.iter().map(|skill| skill.id()).collect();
        let documents: Vec<String> = skills.iter().map(|skill| skill.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&documents).await?;

        self.store.clear().await?;
        self.store.add_documents(ids, documents, embeddings).await?;
        *indexed = Some(generation);

        log::info!(
            "Indexed {} skills with {} (generation {generation})",
            skills.len(),
            self.embedder.model_id()
        );
        Ok(true)
    }

    /// Forget the indexed generation so the next query re-indexes
    pub async fn reset_index(&self) {
        *self.indexed_generation.lock().await = None;
    }

    /// Keyword results re-scored with `max(score, 1 / (1 + distance))` per vector hit
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredSkill>> {
        let mut results = self.retriever.retrieve(query, &[], top_k);
        if results.is_empty() {
            return Ok(results);
        }

        let snapshot = self.retriever.repository().snapshot();
        self.index_skills(snapshot.generation(), snapshot.skills())
            .await?;

        let embedding = self.embedder.embed_text(query).await?;
        let hits = self.store.query(&embedding, top_k).await?;
        log::debug!("Vector search returned {} hits for '{query}'", hits.len());

        for (id, document, distance) in hits.hits() {
            let similarity = 1.0 / (1.0 + distance);
            let by_id = results.iter().position(|result| result.skill.id() == id);
            match by_id {
                Some(idx) => fuse(&mut results[idx], similarity),
                None if !document.is_empty() => {
                    for result in results
                        .iter_mut()
                        .filter(|result| result.skill.content.contains(document))
                    {
                        fuse(result, similarity);
                    }
                }
                None => {}
            }
        }

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(results)
    }
}

fn fuse(result: &mut ScoredSkill, similarity: f32) {
    result.score = result.score.max(similarity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retriever::RetrieverConfig;
    use async_trait::async_trait;
    use skills_loader::{RepositorySnapshot, SkillRepository};
    use skills_vector_store::{InMemoryVectorStore, QueryResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Two-axis embedding: deployment vocabulary vs everything else
    #[derive(Default)]
    struct TopicEmbedder {
        batches: AtomicUsize,
    }

    #[async_trait]
    impl EmbeddingProvider for TopicEmbedder {
        async fn embed_text(&self, text: &str) -> skills_vector_store::Result<Vec<f32>> {
            if text.contains("deploy") || text.contains("container") {
                Ok(vec![1.0, 0.0])
            } else {
                Ok(vec![0.0, 1.0])
            }
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> skills_vector_store::Result<Vec<Vec<f32>>> {
            self.batches.fetch_add(1, Ordering::SeqCst);
            let mut out = Vec::with_capacity(texts.len());
            for text in texts {
                out.push(self.embed_text(text).await?);
            }
            Ok(out)
        }

        fn model_id(&self) -> &str {
            "topic"
        }
    }

    fn skills() -> Vec<Skill> {
        vec![
            Skill::new("kube", "container orchestration notes", "/s/kube/SKILL.md"),
            Skill::new("py", "python web notes", "/s/py/SKILL.md"),
        ]
    }

    fn hybrid(repository: Arc<SkillRepository>) -> (HybridRetriever, Arc<TopicEmbedder>) {
        let retriever =
            Arc::new(SkillRetriever::new(repository, RetrieverConfig::default()).unwrap());
        let embedder = Arc::new(TopicEmbedder::default());
        let hybrid = HybridRetriever::new(
            retriever,
            Arc::new(InMemoryVectorStore::new()),
            Arc::clone(&embedder) as Arc<dyn EmbeddingProvider>,
        );
        (hybrid, embedder)
    }

    #[tokio::test]
    async fn vector_similarity_lifts_semantic_match() {
        let repository = Arc::new(SkillRepository::default());
        repository.replace(RepositorySnapshot::from_skills(skills()));
        let (hybrid, _) = hybrid(repository);

        let results = hybrid.retrieve("deploy services", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name(), "kube");
        assert!((results[0].score - 1.0).abs() < 1e-5);
        assert!(results[1].score >= 0.5 - 1e-5);
    }

    #[tokio::test]
    async fn indexes_once_per_generation() {
        let repository = Arc::new(SkillRepository::default());
        repository.replace(RepositorySnapshot::from_skills(skills()));
        let (hybrid, embedder) = hybrid(Arc::clone(&repository));

        hybrid.retrieve("deploy", 2).await.unwrap();
        hybrid.retrieve("python", 2).await.unwrap();
        assert_eq!(embedder.batches.load(Ordering::SeqCst), 1);
        assert_eq!(hybrid.indexed_generation().await, Some(1));

        repository.replace(RepositorySnapshot::from_skills(skills()));
        hybrid.retrieve("deploy", 2).await.unwrap();
        assert_eq!(embedder.batches.load(Ordering::SeqCst), 2);
        assert_eq!(hybrid.indexed_generation().await, Some(2));
    }

    #[tokio::test]
    async fn empty_index_request_is_a_no_op() {
        let (hybrid, embedder) = hybrid(Arc::new(SkillRepository::default()));
        assert!(!hybrid.index_skills(1, &[]).await.unwrap());
        assert!(hybrid.retrieve("deploy", 3).await.unwrap().is_empty());
        assert_eq!(embedder.batches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reset_forces_reindex() {
        let repository = Arc::new(SkillRepository::default());
        let snapshot = repository.replace(RepositorySnapshot::from_skills(skills()));
        let (hybrid, embedder) = hybrid(repository);

        assert!(hybrid.index_skills(snapshot.generation(), snapshot.skills()).await.unwrap());
        assert!(!hybrid.index_skills(snapshot.generation(), snapshot.skills()).await.unwrap());
        hybrid.reset_index().await;
        assert!(hybrid.index_skills(snapshot.generation(), snapshot.skills()).await.unwrap());
        assert_eq!(embedder.batches.load(Ordering::SeqCst), 2);
    }

    /// Store answering every query with hits whose ids match no skill
    struct ForeignIdStore;

    #[async_trait]
    impl VectorStore for ForeignIdStore {
        async fn add_documents(
            &self,
            _ids: Vec<String>,
            _documents: Vec<String>,
            _embeddings: Vec<Vec<f32>>,
        ) -> skills_vector_store::Result<()> {
            Ok(())
        }

        async fn query(
            &self,
            _embedding: &[f32],
            _top_k: usize,
        ) -> skills_vector_store::Result<QueryResult> {
            Ok(QueryResult {
                ids: vec!["chunk-7".to_string(), "chunk-8".to_string()],
                documents: vec!["routing".to_string(), String::new()],
                distances: vec![0.0, 0.0],
            })
        }

        async fn clear(&self) -> skills_vector_store::Result<()> {
            Ok(())
        }

        async fn len(&self) -> usize {
            0
        }
    }

    #[tokio::test]
    async fn unknown_ids_fall_back_to_content_containment() {
        let repository = Arc::new(SkillRepository::default());
        repository.replace(RepositorySnapshot::from_skills(vec![
            Skill::new("beta", "fastapi routing guide", "/s/beta/SKILL.md"),
            Skill::new("gamma", "fastapi schema guide", "/s/gamma/SKILL.md"),
        ]));
        let retriever =
            Arc::new(SkillRetriever::new(repository, RetrieverConfig::default()).unwrap());
        let keyword_only = retriever.retrieve("fastapi", &[], 2);
        let hybrid = HybridRetriever::new(
            Arc::clone(&retriever),
            Arc::new(ForeignIdStore),
            Arc::new(TopicEmbedder::default()),
        );

        let results = hybrid.retrieve("fastapi", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name(), "beta");
        assert!((results[0].score - 1.0).abs() < 1e-6);

        // the empty hit text must not lift gamma
        let gamma = results.iter().find(|r| r.name() == "gamma").unwrap();
        let expected = keyword_only.iter().find(|r| r.name() == "gamma").unwrap();
        assert!(gamma.score < 1.0);
        assert!((gamma.score - expected.score).abs() < 1e-6);
    }
}
