//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

const EMBEDDED_CONFIG: &str = include_str!("../../data/battle.toml");

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`BattleConfig::default`]. The result is
    /// validated before it is returned.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid battle config {}: {}", path.display(), e))
    }

    /// The stock configuration shipped with the crate.
    pub fn embedded() -> LoadResult<BattleConfig> {
        Self::parse(EMBEDDED_CONFIG)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{CooldownRule, DefenseRule, LockPreset, Tick};

    #[test]
    fn embedded_config_is_the_default() {
        assert_eq!(ConfigLoader::embedded().unwrap(), BattleConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            defense = "mitigating"

            [lock]
            duration = 3000
            "#,
        )
        .unwrap();

        assert_eq!(config.defense, DefenseRule::Mitigating);
        assert_eq!(config.lock, LockPreset::QUICK);
        assert_eq!(config.cooldowns, CooldownRule::SharedLock);
        assert_eq!(config.max_health, BattleConfig::DEFAULT_MAX_HEALTH);
    }

    #[test]
    fn energy_regen_table() {
        let config = ConfigLoader::parse(
            r#"
            [energy_regen]
            amount = 5
            interval = 1000
            "#,
        )
        .unwrap();

        let regen = config.energy_regen.unwrap();
        assert_eq!(regen.amount, 5);
        assert_eq!(regen.interval, Tick::from_secs(1));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(ConfigLoader::parse("max_health = 0").is_err());
        assert!(ConfigLoader::parse("cooldowns = \"sometimes\"").is_err());
    }
}
