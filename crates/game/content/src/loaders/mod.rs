//! Content loaders for reading battle data from files.
//!
//! Skills are RON, battle rules are TOML. The stock files under `data/` are
//! embedded at compile time so a binary runs without a data directory.

pub mod config;
pub mod factory;
pub mod skills;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use skills::{SkillFile, SkillLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
