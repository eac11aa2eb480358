//! Resolves battle rules and the skill catalog from configured sources.
use anyhow::{Context, Result};

use battle_content::{ConfigLoader, ContentFactory, SkillLoader};
use battle_core::{BattleConfig, LockPreset, SkillCatalog};

use crate::config::ContentPaths;

/// Rules and catalog a match is built from.
#[derive(Clone, Debug)]
pub struct BattleContent {
    pub config: BattleConfig,
    pub catalog: SkillCatalog,
}

/// Loads content with precedence: explicit file, then data directory, then
/// the embedded defaults. `lock_preset` replaces the loaded lock table.
pub fn load_content(
    paths: &ContentPaths,
    lock_preset: Option<LockPreset>,
) -> Result<BattleContent> {
    let factory = paths.data_dir.as_ref().map(ContentFactory::new);

    let mut config = match (&paths.config_path, &factory) {
        (Some(path), _) => ConfigLoader::load(path)?,
        (None, Some(factory)) => factory.load_config()?,
        (None, None) => ConfigLoader::embedded()?,
    };
    let catalog = match (&paths.skills_path, &factory) {
        (Some(path), _) => SkillLoader::load(path)?,
        (None, Some(factory)) => factory.load_skills()?,
        (None, None) => SkillLoader::embedded()?,
    };

    if let Some(preset) = lock_preset {
        config.lock = preset;
    }
    catalog
        .validate_costs(config.max_energy)
        .context("Skill catalog does not fit the battle config")?;

    Ok(BattleContent { config, catalog })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use battle_core::{SkillId, Tick};

    use super::*;

    #[test]
    fn embedded_content_by_default() {
        let content = load_content(&ContentPaths::default(), None).unwrap();
        assert_eq!(content.config, BattleConfig::default());
        assert_eq!(content.catalog, SkillCatalog::builtin());
    }

    #[test]
    fn preset_overrides_loaded_lock() {
        let content = load_content(&ContentPaths::default(), Some(LockPreset::QUICK)).unwrap();
        assert_eq!(content.config.lock.duration, Tick::from_secs(3));
        assert!(content.config.lock.rebate.is_none());
    }

    #[test]
    fn explicit_path_wins_over_data_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join(ContentFactory::CONFIG_FILE), "max_health = 200\n").unwrap();
        let explicit = dir.path().join("duel.toml");
        fs::write(&explicit, "max_health = 300\n").unwrap();

        let paths = ContentPaths {
            config_path: Some(explicit),
            skills_path: None,
            data_dir: Some(dir.path().to_path_buf()),
        };
        let content = load_content(&paths, None).unwrap();
        assert_eq!(content.config.max_health, 300);
        assert!(content.catalog.skill(SkillId::Revive).is_some());
    }

    #[test]
    fn rejects_catalog_that_outgrows_energy() {
        let dir = tempfile::tempdir().expect("temp dir");
        let rules = dir.path().join("tight.toml");
        fs::write(&rules, "max_energy = 40\n").unwrap();

        let paths = ContentPaths {
            config_path: Some(rules),
            ..ContentPaths::default()
        };
        let err = load_content(&paths, None).unwrap_err();
        assert!(err.to_string().contains("does not fit"), "{err:#}");
    }
}
