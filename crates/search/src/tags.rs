use serde::{Deserialize, Serialize};
use skills_loader::Skill;
use std::collections::HashSet;
use std::sync::Arc;

/// How requested tags restrict candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagFilterMode {
    /// Skill shares at least one requested tag
    #[default]
    Any,
    /// Skill carries every requested tag
    All,
}

/// Lower-case, sort and deduplicate a tag list
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = tags
        .iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect();
    normalized.sort();
    normalized.dedup();
    normalized
}

/// Keep the skills matching `tags` under `mode`; no tags keeps everything
pub fn filter_by_tags(
    skills: &[Arc<Skill>],
    tags: &[String],
    mode: TagFilterMode,
) -> Vec<Arc<Skill>> {
    let wanted = normalize_tags(tags);
    if wanted.is_empty() {
        return skills.to_vec();
    }

    skills
        .iter()
        .filter(|skill| {
            let own: HashSet<String> = skill.normalized_tags().into_iter().collect();
            match mode {
                TagFilterMode::Any => wanted.iter().any(|tag| own.contains(tag)),
                TagFilterMode::All => wanted.iter().all(|tag| own.contains(tag)),
            }
        })
        .cloned()
        .collect()
}

/// 1.0 when any requested tag is on the skill, else 0.0
pub fn tag_score(skill: &Skill, tags: &[String]) -> f32 {
    if tags.iter().any(|tag| skill.has_tag(tag.trim())) {
        1.0
    } else {
        0.0
    }
}
