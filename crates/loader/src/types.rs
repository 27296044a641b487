use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Declared importance tier of a skill
///
/// Variant order is the ranking order: `High` sorts before `Medium`,
/// which sorts before `Low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Position in the ordering (0 = most important)
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata parsed from a skill document's front-matter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillMetadata {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub priority: Priority,
    pub version: Option<String>,
}

/// A loaded skill document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Skill {
    /// Unique name within one repository generation
    pub name: String,

    /// One-line summary from front-matter
    pub description: String,

    /// Body text with front-matter stripped
    pub content: String,

    /// Categorization tags, original casing preserved
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub priority: Priority,

    pub version: Option<String>,

    /// Path of the source document
    pub file_path: String,
}

impl Skill {
    /// Build a skill from parsed metadata and body
    pub fn from_metadata(
        metadata: SkillMetadata,
        content: String,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            name: metadata.name,
            description: metadata.description,
            content,
            tags: metadata.tags,
            priority: metadata.priority,
            version: metadata.version,
            file_path: file_path.into(),
        }
    }

    /// Stable identifier used by the vector store
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}:{}", self.name, self.file_path)
    }

    /// Case-insensitive tag membership
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }

    /// Tags lower-cased for set comparisons
    #[must_use]
    pub fn normalized_tags(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.to_lowercase()).collect()
    }

    /// Builder: set tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set priority
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Builder: set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Minimal skill with the given name, content and source path
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            content: content.into(),
            tags: Vec::new(),
            priority: Priority::Medium,
            version: None,
            file_path: file_path.into(),
        }
    }
}

/// A skill paired with its relevance to one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSkill {
    pub skill: Arc<Skill>,
    pub score: f32,
}

impl ScoredSkill {
    pub const fn new(skill: Arc<Skill>, score: f32) -> Self {
        Self { skill, score }
    }

    pub fn name(&self) -> &str {
        &self.skill.name
    }
}
