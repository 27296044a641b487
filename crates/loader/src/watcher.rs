use crate::error::Result;
use crate::scanner::SkillScanner;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;

/// Filesystem watcher reporting changes to skill documents.
///
/// The callback runs on the notify backend thread with the path of every
/// created, modified or removed `SKILL.md`.
pub struct SkillWatcher {
    dirs: Vec<PathBuf>,
    watcher: Option<RecommendedWatcher>,
}

impl SkillWatcher {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self {
            dirs,
            watcher: None,
        }
    }

    /// Start watching every existing directory. Restarting replaces the
    /// previous backend.
    pub fn start<F>(&mut self, on_change: F) -> Result<()>
    where
        F: Fn(PathBuf) + Send + 'static,
    {
        self.stop();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for path in skill_paths(&event) {
                    on_change(path);
                }
            }
            Err(e) => log::warn!("Skill watcher error: {e}"),
        })?;

        let mut watched = 0usize;
        for dir in &self.dirs {
            if !dir.is_dir() {
                continue;
            }
            watcher.watch(dir, RecursiveMode::Recursive)?;
            watched += 1;
        }
        log::info!("Watching {watched} skill directories");

        self.watcher = Some(watcher);
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.watcher.take().is_some() {
            log::debug!("Skill watcher stopped");
        }
    }

    pub const fn is_running(&self) -> bool {
        self.watcher.is_some()
    }
}

impl Drop for SkillWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

fn skill_paths(event: &Event) -> Vec<PathBuf> {
    let relevant = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    if !relevant {
        return Vec::new();
    }
    event
        .paths
        .iter()
        .filter(|path| SkillScanner::is_skill_file(path))
        .cloned()
        .collect()
}
