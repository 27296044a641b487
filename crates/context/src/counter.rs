use crate::error::{ContextError, Result};
use tiktoken_rs::CoreBPE;

pub const DEFAULT_TOKEN_MODEL: &str = "gpt-4";

/// Measures text in model tokens
pub trait TokenCounter: Send + Sync {
    fn count(&self, text: &str) -> usize;
}

/// Whitespace word count, never below 1
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCounter;

impl TokenCounter for WordCounter {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count().max(1)
    }
}

/// Exact BPE token count via tiktoken
pub struct TiktokenCounter {
    bpe: CoreBPE,
    model: String,
}

impl TiktokenCounter {
    /// Tokenizer matching `model` (e.g. `gpt-4`, `gpt-4o`)
    pub fn for_model(model: &str) -> Result<Self> {
        let bpe = tiktoken_rs::get_bpe_from_model(model).map_err(|e| {
            ContextError::TokenizerUnavailable {
                model: model.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            bpe,
            model: model.to_string(),
        })
    }

    /// The `cl100k_base` encoding used by the GPT-4 family
    pub fn cl100k() -> Result<Self> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| ContextError::TokenizerUnavailable {
            model: "cl100k_base".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            bpe,
            model: "cl100k_base".to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

/// Best available counter for `model` (default `gpt-4`).
///
/// Unknown models use `cl100k_base`; if no BPE tables load at all, words are
/// counted instead.
pub fn counter_for_model(model: Option<&str>) -> Box<dyn TokenCounter> {
    let model = model.unwrap_or(DEFAULT_TOKEN_MODEL);
    match TiktokenCounter::for_model(model) {
        Ok(counter) => return Box::new(counter),
        Err(e) => log::debug!("{e}; trying cl100k_base"),
    }
    match TiktokenCounter::cl100k() {
        Ok(counter) => Box::new(counter),
        Err(e) => {
            log::debug!("{e}; counting words instead");
            Box::new(WordCounter)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_counter_has_floor_of_one() {
        assert_eq!(WordCounter.count(""), 1);
        assert_eq!(WordCounter.count("   "), 1);
        assert_eq!(WordCounter.count("one two\nthree"), 3);
    }

    #[test]
    fn tiktoken_counts_bpe_tokens() {
        let counter = TiktokenCounter::for_model("gpt-4").unwrap();
        assert_eq!(counter.model(), "gpt-4");
        let count = counter.count("hello world");
        assert_eq!(count, 2);
    }

    #[test]
    fn unknown_model_still_counts() {
        assert!(TiktokenCounter::for_model("not-a-model").is_err());
        let counter = counter_for_model(Some("not-a-model"));
        assert!(counter.count("hello world") >= 1);
    }
}
