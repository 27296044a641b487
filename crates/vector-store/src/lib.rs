//! # Skills Vector Store
//!
//! Embedding providers and nearest-neighbour storage for hybrid skill search.
//!
//! ## Architecture
//!
//! ```text
//! Skill content
//!     │
//!     ├──> EmbeddingProvider
//!     │      ├─> HashEmbedder (offline, deterministic)
//!     │      └─> OpenAiEmbedder (HTTP)
//!     │
//!     └──> VectorStore
//!            └─> InMemoryVectorStore (flat cosine index)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use skills_vector_store::{EmbeddingProvider, HashEmbedder, InMemoryVectorStore, VectorStore};
//!
//! #[tokio::main]
//! async fn main() -> skills_vector_store::Result<()> {
//!     let embedder = HashEmbedder::new(256);
//!     let store = InMemoryVectorStore::new();
//!
//!     let doc = "Use thiserror for library errors".to_string();
//!     let vector = embedder.embed_text(&doc).await?;
//!     store.add_documents(vec!["errors".into()], vec![doc], vec![vector]).await?;
//!
//!     let query = embedder.embed_text("library error types").await?;
//!     let hits = store.query(&query, 3).await?;
//!     for (id, distance) in hits.ids.iter().zip(&hits.distances) {
//!         println!("{id}: {distance:.3}");
//!     }
//!     Ok(())
//! }
//! ```

mod embeddings;
mod error;
mod index;
mod store;
mod types;

pub use embeddings::{EmbeddingProvider, HashEmbedder, OpenAiConfig, OpenAiEmbedder};
pub use error::{Result, VectorStoreError};
pub use index::{cosine_similarity, FlatIndex};
pub use store::{InMemoryVectorStore, VectorStore};
pub use types::QueryResult;
