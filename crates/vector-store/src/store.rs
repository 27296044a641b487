use crate::error::{Result, VectorStoreError};
use crate::index::FlatIndex;
use crate::types::QueryResult;
use async_trait::async_trait;
use std::sync::RwLock;

/// Document store searchable by embedding
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Push documents with precomputed embeddings. Existing ids are replaced.
    async fn add_documents(
        &self,
        ids: Vec<String>,
        documents: Vec<String>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<()>;

    /// Nearest `top_k` documents to `embedding`, closest first
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<QueryResult>;

    /// Remove every document
    async fn clear(&self) -> Result<()>;

    async fn len(&self) -> usize;
}

#[derive(Default)]
struct State {
    index: FlatIndex,
    documents: Vec<String>,
}

/// Process-local store over a flat cosine index.
///
/// Distances are cosine distances (`1 - similarity`), so identical
/// directions are at distance 0.
pub struct InMemoryVectorStore {
    state: RwLock<State>,
    fixed_dimension: bool,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            fixed_dimension: false,
        }
    }

    /// Store that rejects vectors of any other dimension
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            state: RwLock::new(State {
                index: FlatIndex::with_dimension(dimension),
                documents: Vec::new(),
            }),
            fixed_dimension: true,
        }
    }

    fn lock_error() -> VectorStoreError {
        VectorStoreError::IndexError("vector store lock poisoned".to_string())
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add_documents(
        &self,
        ids: Vec<String>,
        documents: Vec<String>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<()> {
        if ids.len() != documents.len() || ids.len() != embeddings.len() {
            return Err(VectorStoreError::MismatchedBatch {
                ids: ids.len(),
                documents: documents.len(),
                embeddings: embeddings.len(),
            });
        }
        if ids.is_empty() {
            return Ok(());
        }

        let count = ids.len();
        let mut state = self.state.write().map_err(|_| Self::lock_error())?;
        for ((id, document), vector) in ids.into_iter().zip(documents).zip(embeddings) {
            let slot = state.index.upsert(&id, &vector)?;
            if slot == state.documents.len() {
                state.documents.push(document);
            } else {
                state.documents[slot] = document;
            }
        }

        log::info!(
            "Vector documents added: {count} (total {})",
            state.index.len()
        );
        Ok(())
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<QueryResult> {
        let state = self.state.read().map_err(|_| Self::lock_error())?;
        if state.index.is_empty() || top_k == 0 {
            return Ok(QueryResult::default());
        }

        let neighbours = state.index.search(embedding, top_k)?;
        let mut result = QueryResult::default();
        for (slot, similarity) in neighbours {
            let Some(id) = state.index.id(slot) else {
                continue;
            };
            result.ids.push(id.to_string());
            result.documents.push(state.documents[slot].clone());
            result.distances.push((1.0 - similarity).max(0.0));
        }

        log::debug!("Vector query completed: {} hits", result.len());
        Ok(result)
    }

    async fn clear(&self) -> Result<()> {
        let mut state = self.state.write().map_err(|_| Self::lock_error())?;
        state.index.clear(self.fixed_dimension);
        state.documents.clear();
        Ok(())
    }

    async fn len(&self) -> usize {
        self.state.read().map(|state| state.index.len()).unwrap_or(0)
    }
}
