//! # Skills Loader
//!
//! Discovery, parsing and in-memory storage of skill documents.
//!
//! ## Pipeline
//!
//! ```text
//! Skill directories
//!     │
//!     ├──> Scanner (recursive, SKILL.md only)
//!     │      └─> Document paths
//!     │
//!     ├──> Front-matter parser
//!     │      └─> SkillMetadata + body
//!     │
//!     └──> Repository snapshot (by name, by tag)
//!            └─> Atomic swap on reload
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use skills_loader::SkillRepository;
//! use std::path::PathBuf;
//!
//! let repository = SkillRepository::new(256);
//! let skills = repository.reload(&[PathBuf::from(".opencode/skills")]);
//! println!("Loaded {} skills", skills.len());
//!
//! if let Some(skill) = repository.get("rust-errors") {
//!     println!("{}: {}", skill.name, skill.description);
//! }
//! ```

mod cache;
mod error;
mod frontmatter;
mod repository;
mod scanner;
mod types;
mod watcher;

pub use cache::GenerationCache;
pub use error::{LoaderError, Result};
pub use frontmatter::{parse_document, read_document};
pub use repository::{RepositorySnapshot, SkillRepository};
pub use scanner::{default_skill_dirs, SkillScanner, SKILL_FILE_NAME};
pub use types::{Priority, ScoredSkill, Skill, SkillMetadata};
pub use watcher::SkillWatcher;
