use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Vector search is enabled but {0} is not configured")]
    VectorSearchUnavailable(&'static str),

    #[error("Loader error: {0}")]
    Loader(#[from] skills_loader::LoaderError),

    #[error("Search error: {0}")]
    Search(#[from] skills_search::SearchError),

    #[error("Vector store error: {0}")]
    VectorStore(#[from] skills_vector_store::VectorStoreError),
}
