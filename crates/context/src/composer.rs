use crate::counter::TokenCounter;
use skills_loader::{ScoredSkill, Skill};

pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Order by priority tier first, then by score descending within a tier.
///
/// The sort is stable, so equal entries keep their retrieval order.
pub fn sort_by_priority(ranked: &[ScoredSkill]) -> Vec<ScoredSkill> {
    let mut ordered = ranked.to_vec();
    ordered.sort_by(|a, b| {
        a.skill
            .priority
            .rank()
            .cmp(&b.skill.priority.rank())
            .then_with(|| b.score.total_cmp(&a.score))
    });
    ordered
}

/// Render one titled section per skill
pub fn compose_context<'a>(skills: impl IntoIterator<Item = &'a Skill>) -> String {
    let sections: Vec<String> = skills
        .into_iter()
        .map(|skill| {
            format!(
                "## Skill: {}\nSource: {}\n{}",
                skill.name,
                skill.file_path,
                skill.content.trim()
            )
        })
        .collect();
    sections.join(SECTION_SEPARATOR).trim().to_string()
}

/// Cut `text` to roughly `max_tokens` on a line boundary.
///
/// Whole lines are kept until the running count reaches the budget, so the
/// result may overshoot by the last line but is always a line prefix of
/// `text` (trimmed).
pub fn truncate_content(text: &str, max_tokens: usize, counter: &dyn TokenCounter) -> String {
    if counter.count(text) <= max_tokens {
        return text.to_string();
    }

    let mut kept: Vec<&str> = Vec::new();
    for line in text.lines() {
        kept.push(line);
        if counter.count(&kept.join("\n")) >= max_tokens {
            break;
        }
    }
    log::debug!(
        "Context truncated to {} of {} lines",
        kept.len(),
        text.lines().count()
    );
    kept.join("\n").trim().to_string()
}

/// Priority-ordered, rendered and truncated context for ranked skills
pub fn build_context(
    ranked: &[ScoredSkill],
    max_tokens: usize,
    counter: &dyn TokenCounter,
) -> String {
    let ordered = sort_by_priority(ranked);
    let context = compose_context(ordered.iter().map(|item| item.skill.as_ref()));
    truncate_content(&context, max_tokens, counter)
}
