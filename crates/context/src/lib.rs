//! # Skills Context
//!
//! Turns ranked skills into one bounded text payload for a prompt.
//!
//! ```text
//! ranked skills ──> sort_by_priority ──> compose_context ──> truncate_content
//!                    (tier, -score)       "## Skill: …"        whole lines
//! ```
//!
//! Token budgets are measured with a [`TokenCounter`]: exact BPE counts via
//! tiktoken when the model is known, otherwise a word count.

mod composer;
mod counter;
mod error;

pub use composer::{
    build_context, compose_context, sort_by_priority, truncate_content, SECTION_SEPARATOR,
};
pub use counter::{
    counter_for_model, TiktokenCounter, TokenCounter, WordCounter, DEFAULT_TOKEN_MODEL,
};
pub use error::{ContextError, Result};
