use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] skills_vector_store::VectorStoreError),

    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(String),

    #[error("{0}")]
    Other(String),
}
