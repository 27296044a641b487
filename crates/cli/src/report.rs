use serde::Serialize;
use skills_loader::{Priority, ScoredSkill, Skill};

#[derive(Debug, Serialize)]
pub struct SkillSummary {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub priority: Priority,
    pub file_path: String,
}

impl From<&Skill> for SkillSummary {
    fn from(skill: &Skill) -> Self {
        Self {
            name: skill.name.clone(),
            description: skill.description.clone(),
            tags: skill.tags.clone(),
            priority: skill.priority,
            file_path: skill.file_path.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QueryHit {
    pub name: String,
    pub score: f32,
    pub priority: Priority,
    pub file_path: String,
}

impl From<&ScoredSkill> for QueryHit {
    fn from(item: &ScoredSkill) -> Self {
        Self {
            name: item.skill.name.clone(),
            score: item.score,
            priority: item.skill.priority,
            file_path: item.skill.file_path.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContextOutput {
    pub skills: Vec<String>,
    pub context: String,
}

pub fn print_skills(skills: &[SkillSummary]) {
    if skills.is_empty() {
        eprintln!("No skills found");
        return;
    }
    for skill in skills {
        let tags = if skill.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", skill.tags.join(", "))
        };
        println!("{} ({}){tags}", skill.name, skill.priority);
        if !skill.description.is_empty() {
            println!("   {}", skill.description);
        }
        println!("   {}", skill.file_path);
    }
}

pub fn print_hits(hits: &[QueryHit]) {
    if hits.is_empty() {
        eprintln!("No matching skills");
        return;
    }
    for (i, hit) in hits.iter().enumerate() {
        println!("{}. {} (score: {:.3}, {})", i + 1, hit.name, hit.score, hit.priority);
        println!("   {}", hit.file_path);
    }
}
