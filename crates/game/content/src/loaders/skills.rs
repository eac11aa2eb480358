//! Skill catalog loader.

use std::path::Path;

use battle_core::{Skill, SkillCatalog};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const EMBEDDED_SKILLS: &str = include_str!("../../data/skills.ron");

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillFile {
    pub skills: Vec<Skill>,
}

/// Loader for the skill catalog from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load and validate a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid skill catalog {}: {}", path.display(), e))
    }

    /// The stock catalog shipped with the crate.
    pub fn embedded() -> LoadResult<SkillCatalog> {
        Self::parse(EMBEDDED_SKILLS)
            .map_err(|e| anyhow::anyhow!("Invalid embedded skills.ron: {}", e))
    }

    /// Parse RON text into a validated catalog.
    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        let file: SkillFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        Ok(SkillCatalog::new(file.skills)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{SkillCategory, SkillEffect, SkillId, Tick};

    #[test]
    fn embedded_catalog_matches_builtin() {
        let catalog = SkillLoader::embedded().expect("embedded skills.ron should parse");
        assert_eq!(catalog, SkillCatalog::builtin());
    }

    #[test]
    fn parses_a_minimal_catalog() {
        let ron = r#"(
            skills: [
                (id: dodge, name: "Dodge", category: Defense, cooldown: 2000, energy_cost: 15,
                    effect: Guard(buff: Dodge, duration: 400)),
            ],
        )"#;

        let catalog = SkillLoader::parse(ron).unwrap();
        assert_eq!(catalog.len(), 1);

        let dodge = catalog.get("dodge").unwrap();
        assert_eq!(dodge.category, SkillCategory::Defense);
        assert_eq!(dodge.cooldown, Tick::from_millis(2_000));
        assert!(matches!(dodge.effect, SkillEffect::Guard { .. }));
        assert!(catalog.skill(SkillId::Fireball).is_none());
    }

    #[test]
    fn rejects_invalid_catalog() {
        let ron = r#"(
            skills: [
                (id: heal, name: "Heal", category: Attack, cooldown: 3000, energy_cost: 15,
                    effect: Heal(amount: 300, delay: 1000)),
            ],
        )"#;

        let err = SkillLoader::parse(ron).unwrap_err();
        assert!(err.to_string().contains("heal"), "{err}");
    }
}
