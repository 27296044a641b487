use crate::cache::GenerationCache;
use crate::frontmatter::read_document;
use crate::scanner::SkillScanner;
use crate::types::Skill;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Immutable view of one loaded repository generation
#[derive(Debug, Default)]
pub struct RepositorySnapshot {
    generation: u64,
    skills: Vec<Arc<Skill>>,
    by_name: HashMap<String, usize>,
    by_tag: HashMap<String, Vec<usize>>,
}

impl RepositorySnapshot {
    /// Index a set of skills. Later duplicates of a name are dropped.
    pub fn from_skills(skills: impl IntoIterator<Item = Skill>) -> Self {
        let mut snapshot = Self::default();
        for skill in skills {
            if snapshot.by_name.contains_key(&skill.name) {
                log::warn!(
                    "Duplicate skill name '{}' in {}; keeping the first definition",
                    skill.name,
                    skill.file_path
                );
                continue;
            }
            let idx = snapshot.skills.len();
            snapshot.by_name.insert(skill.name.clone(), idx);
            for tag in skill.normalized_tags() {
                let slots = snapshot.by_tag.entry(tag).or_default();
                if !slots.contains(&idx) {
                    slots.push(idx);
                }
            }
            snapshot.skills.push(Arc::new(skill));
        }
        snapshot
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn skills(&self) -> &[Arc<Skill>] {
        &self.skills
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Skill>> {
        self.by_name.get(name).map(|&idx| &self.skills[idx])
    }

    /// Skills carrying `tag` (case-insensitive)
    pub fn by_tag(&self, tag: &str) -> Vec<Arc<Skill>> {
        self.by_tag
            .get(&tag.to_lowercase())
            .map(|slots| slots.iter().map(|&idx| Arc::clone(&self.skills[idx])).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// In-memory skill repository with whole-generation reloads.
///
/// Readers take an `Arc` to the current snapshot and never observe a
/// partially loaded set: `reload` builds the next snapshot off to the side
/// and swaps it in under the write lock.
pub struct SkillRepository {
    current: RwLock<Arc<RepositorySnapshot>>,
    name_cache: GenerationCache<String, Arc<Skill>>,
}

impl SkillRepository {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            current: RwLock::new(Arc::new(RepositorySnapshot::default())),
            name_cache: GenerationCache::new(cache_capacity),
        }
    }

    /// Rescan `dirs` and replace the whole repository.
    ///
    /// Files that cannot be read are logged and skipped.
    pub fn reload(&self, dirs: &[PathBuf]) -> Vec<Arc<Skill>> {
        let paths = SkillScanner::new(dirs).scan();
        let skills = paths.iter().filter_map(|path| match load_skill(path) {
            Ok(skill) => Some(skill),
            Err(e) => {
                log::warn!("Skipping skill document: {e}");
                None
            }
        });
        let snapshot = self.replace(RepositorySnapshot::from_skills(skills));
        log::info!(
            "Skills reloaded: {} (generation {})",
            snapshot.len(),
            snapshot.generation()
        );
        snapshot.skills().to_vec()
    }

    /// Swap in a prepared snapshot, assigning it the next generation
    pub fn replace(&self, mut snapshot: RepositorySnapshot) -> Arc<RepositorySnapshot> {
        let mut current = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        snapshot.generation = current.generation + 1;
        let snapshot = Arc::new(snapshot);
        *current = Arc::clone(&snapshot);
        drop(current);
        self.name_cache.clear();
        snapshot
    }

    /// Current generation; consistent for the lifetime of the returned `Arc`
    pub fn snapshot(&self) -> Arc<RepositorySnapshot> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    pub fn generation(&self) -> u64 {
        self.snapshot().generation()
    }

    pub fn list(&self) -> Vec<Arc<Skill>> {
        self.snapshot().skills().to_vec()
    }

    /// Look up a skill by exact name
    pub fn get(&self, name: &str) -> Option<Arc<Skill>> {
        let snapshot = self.snapshot();
        let generation = snapshot.generation();
        if let Some(hit) = self.name_cache.get(generation, &name.to_string()) {
            return Some(hit);
        }
        let skill = Arc::clone(snapshot.get(name)?);
        self.name_cache
            .insert(generation, name.to_string(), Arc::clone(&skill));
        Some(skill)
    }

    pub fn by_tag(&self, tag: &str) -> Vec<Arc<Skill>> {
        self.snapshot().by_tag(tag)
    }
}

impl Default for SkillRepository {
    fn default() -> Self {
        Self::new(256)
    }
}

fn load_skill(path: &Path) -> crate::Result<Skill> {
    let (mut metadata, content) = read_document(path)?;
    if metadata.name.is_empty() {
        metadata.name = path
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    Ok(Skill::from_metadata(
        metadata,
        content,
        path.to_string_lossy().into_owned(),
    ))
}
