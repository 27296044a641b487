//! # Skills Search
//!
//! Ranked retrieval of skills for a free-text query.
//!
//! ## Scoring
//!
//! ```text
//! query, tags
//!     │
//!     ├──> Tag pre-filter (any | all)
//!     │
//!     ├──> Signals per candidate
//!     │      ├─> keyword  TF-IDF over the filtered corpus
//!     │      ├─> tag      1.0 when any requested tag matches
//!     │      └─> fuzzy    name / path similarity ratio
//!     │
//!     ├──> Composite = Σ weight·signal + priority boost
//!     │
//!     └──> Optional hybrid fusion with vector search
//! ```

mod cache;
mod error;
mod fuzzy;
mod hybrid;
mod keyword;
mod retriever;
mod scoring;
mod tags;
mod tokenize;

pub use cache::{QueryCache, QueryKey};
pub use error::{Result, SearchError};
pub use fuzzy::{fuzzy_score, FuzzyMatcher, FuzzyStrategy, IndelRatio, NucleoRatio};
pub use hybrid::HybridRetriever;
pub use keyword::{keyword_score, term_frequencies, InverseDocumentFrequency};
pub use retriever::{RetrieverConfig, SkillRetriever, DEFAULT_TOP_K};
pub use scoring::{relevance_score, PriorityBoost, ScoringWeights, Signals};
pub use skills_loader::ScoredSkill;
pub use tags::{filter_by_tags, normalize_tags, tag_score, TagFilterMode};
pub use tokenize::{CjkTokenizer, RegexTokenizer, Tokenizer, TokenizerStrategy};
