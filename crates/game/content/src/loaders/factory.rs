//! Content factory for loading battle content from a data directory.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, SkillCatalog};

use crate::loaders::{ConfigLoader, LoadResult, SkillLoader};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// └── skills.ron
/// ```
///
/// A file missing from the directory falls back to the embedded copy.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "battle.toml";
    pub const SKILLS_FILE: &'static str = "skills.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle rules from `battle.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            ConfigLoader::embedded()
        }
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillCatalog> {
        let path = self.data_dir.join(Self::SKILLS_FILE);
        if path.exists() {
            SkillLoader::load(&path)
        } else {
            SkillLoader::embedded()
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
