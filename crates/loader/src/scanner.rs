use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Marker file name identifying a skill document
pub const SKILL_FILE_NAME: &str = "SKILL.md";

/// Conventional skill locations under a project root
pub fn default_skill_dirs(root: impl AsRef<Path>) -> Vec<PathBuf> {
    let base = root.as_ref().join(".opencode");
    vec![base.join("skill"), base.join("skills")]
}

/// Scanner for finding skill documents in a set of directories
pub struct SkillScanner {
    dirs: Vec<PathBuf>,
}

impl SkillScanner {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            dirs: dirs.into_iter().map(|d| d.as_ref().to_path_buf()).collect(),
        }
    }

    /// Recursively collect `SKILL.md` files.
    ///
    /// Directories are visited in the given order and paths within a
    /// directory are sorted, so scan order is deterministic.
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for base in &self.dirs {
            if !base.is_dir() {
                log::debug!("Skipping missing skill directory {}", base.display());
                continue;
            }

            let mut found = Vec::new();
            let mut builder = WalkBuilder::new(base);
            // Skill trees live under dot-directories and are listed explicitly,
            // so ignore files do not apply.
            builder
                .hidden(false)
                .parents(false)
                .ignore(false)
                .git_ignore(false)
                .git_global(false)
                .git_exclude(false);

            for result in builder.build() {
                match result {
                    Ok(entry) => {
                        let Some(file_type) = entry.file_type() else {
                            continue;
                        };
                        if file_type.is_file() && Self::is_skill_file(entry.path()) {
                            found.push(entry.into_path());
                        }
                    }
                    Err(e) => log::warn!("Failed to read entry under {}: {e}", base.display()),
                }
            }

            found.sort();
            files.extend(found);
        }

        if !files.is_empty() {
            log::info!("Skill files scanned: {}", files.len());
        }
        files
    }

    pub fn is_skill_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == SKILL_FILE_NAME)
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}
