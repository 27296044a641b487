use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use skills_loader::Priority;

/// Per-signal weights of the composite relevance score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub keyword: f32,
    pub tag: f32,
    pub fuzzy: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword: 0.6,
            tag: 0.2,
            fuzzy: 0.2,
        }
    }
}

impl ScoringWeights {
    /// Reject negative or non-finite weights
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("keyword", self.keyword),
            ("tag", self.tag),
            ("fuzzy", self.fuzzy),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SearchError::InvalidWeights(format!(
                    "{name} weight must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Fixed score adjustment per priority tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityBoost {
    pub high: f32,
    pub medium: f32,
    pub low: f32,
}

impl Default for PriorityBoost {
    fn default() -> Self {
        Self {
            high: 0.10,
            medium: 0.0,
            low: -0.05,
        }
    }
}

impl PriorityBoost {
    pub const fn for_priority(&self, priority: Priority) -> f32 {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

/// Raw per-candidate signals before weighting
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Signals {
    pub keyword: f32,
    pub tag: f32,
    pub fuzzy: f32,
}

pub fn relevance_score(
    priority: Priority,
    signals: Signals,
    weights: &ScoringWeights,
    boost: &PriorityBoost,
) -> f32 {
    signals.keyword * weights.keyword
        + signals.tag * weights.tag
        + signals.fuzzy * weights.fuzzy
        + boost.for_priority(priority)
}
