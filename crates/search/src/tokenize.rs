use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

static ASCII_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("valid word regex"));

static CJK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}]").expect("valid CJK regex")
});

/// Splits text into lower-cased terms for TF-IDF
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// ASCII word splitter: runs of `[A-Za-z0-9_]`, lower-cased
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexTokenizer;

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        ASCII_WORD_RE
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }
}

/// ASCII splitter extended with Unicode word segmentation for CJK scripts.
///
/// Segmented CJK words are appended to the ASCII tokens, never substituted,
/// so mixed-script text keeps every term the plain splitter finds.
#[derive(Debug, Clone, Copy, Default)]
pub struct CjkTokenizer;

impl Tokenizer for CjkTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = RegexTokenizer.tokenize(text);
        tokens.extend(
            text.unicode_words()
                .filter(|word| CJK_RE.is_match(word))
                .map(str::to_lowercase),
        );
        tokens
    }
}

/// Tokenizer selection for configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerStrategy {
    #[default]
    Regex,
    Cjk,
}

impl TokenizerStrategy {
    pub fn build(self) -> Box<dyn Tokenizer> {
        match self {
            Self::Regex => Box::new(RegexTokenizer),
            Self::Cjk => Box::new(CjkTokenizer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_on_non_word_characters() {
        let tokens = RegexTokenizer.tokenize("FastAPI routing-guidance, v2_api!");
        assert_eq!(tokens, vec!["fastapi", "routing", "guidance", "v2_api"]);
    }

    #[test]
    fn regex_tokenizer_drops_cjk() {
        assert!(RegexTokenizer.tokenize("数据库").is_empty());
    }

    #[test]
    fn cjk_tokens_are_added_not_substituted() {
        let tokens = CjkTokenizer.tokenize("Redis 缓存 guide");
        assert!(tokens.contains(&"redis".to_string()));
        assert!(tokens.contains(&"guide".to_string()));
        assert!(tokens.iter().any(|t| t.contains('缓')));
        // ASCII words are not duplicated by the segmenter
        assert_eq!(tokens.iter().filter(|t| *t == "redis").count(), 1);
    }

    #[test]
    fn strategy_builds_matching_tokenizer() {
        let tokenizer = TokenizerStrategy::Cjk.build();
        assert!(!tokenizer.tokenize("日本語").is_empty());
    }
}
