use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContextError>;

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Tokenizer unavailable for model '{model}': {reason}")]
    TokenizerUnavailable { model: String, reason: String },

    #[error("{0}")]
    Other(String),
}
