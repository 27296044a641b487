//! # Skills Engine
//!
//! One object wiring the skill repository, retrievers and context composer
//! together from an [`EngineConfig`].
//!
//! ## Example
//!
//! ```no_run
//! use skills_engine::{EngineConfig, SkillsEngine};
//! use std::path::Path;
//!
//! # async fn run() -> skills_engine::Result<()> {
//! let config = EngineConfig::from_file(Path::new("skills.toml"))?.with_env_overrides();
//! let engine = SkillsEngine::from_config(config, Path::new("."))?;
//! engine.reload();
//!
//! let (context, names) = engine
//!     .build_skills_context("fastapi endpoints", &[], None, Some(1500), None)
//!     .await?;
//! println!("{names:?}\n{context}");
//! # Ok(())
//! # }
//! ```

mod config;
mod engine;
mod error;

pub use config::{
    EmbeddingBackend, EmbeddingConfig, EngineConfig, ENV_ENABLE_VECTOR_SEARCH, ENV_SKILL_DIRS,
    ENV_TOKEN_MODEL,
};
pub use engine::{SkillsEngine, SkillsEngineBuilder};
pub use error::{EngineError, Result};
