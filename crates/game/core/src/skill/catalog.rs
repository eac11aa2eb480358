//! Read-only skill catalog keyed by id.

use std::collections::HashMap;

use super::{Skill, SkillCategory, SkillEffect, SkillId};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{DefenseBuff, Permille, Tick};

/// Errors raised while building or querying a [`SkillCatalog`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown skill '{0}'")]
    UnknownSkill(String),

    #[error("skill {0} is defined more than once")]
    DuplicateSkill(SkillId),

    #[error("skill {0} has a zero cooldown")]
    ZeroCooldown(SkillId),

    #[error("skill {0} heals over time with zero pulses")]
    ZeroPulses(SkillId),

    #[error("skill {0} heals over time with a zero pulse interval")]
    ZeroInterval(SkillId),

    #[error("skill {id} is declared {declared} but its effect belongs to {effect}")]
    CategoryMismatch {
        id: SkillId,
        declared: SkillCategory,
        effect: SkillCategory,
    },

    #[error("skill {id} costs {cost} energy but actors only hold {max_energy}")]
    CostExceedsMaxEnergy {
        id: SkillId,
        cost: u32,
        max_energy: u32,
    },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CatalogError::UnknownSkill(_) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CatalogError::UnknownSkill(_) => "CATALOG_UNKNOWN_SKILL",
            CatalogError::DuplicateSkill(_) => "CATALOG_DUPLICATE_SKILL",
            CatalogError::ZeroCooldown(_) => "CATALOG_ZERO_COOLDOWN",
            CatalogError::ZeroPulses(_) => "CATALOG_ZERO_PULSES",
            CatalogError::ZeroInterval(_) => "CATALOG_ZERO_INTERVAL",
            CatalogError::CategoryMismatch { .. } => "CATALOG_CATEGORY_MISMATCH",
            CatalogError::CostExceedsMaxEnergy { .. } => "CATALOG_COST_EXCEEDS_MAX_ENERGY",
        }
    }
}

/// Immutable collection of skills.
///
/// Preserves insertion order for display; lookups go through an id index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillCatalog {
    skills: Vec<Skill>,
    index: HashMap<SkillId, usize>,
}

impl SkillCatalog {
    /// Standard attack travel time before damage lands.
    pub const ATTACK_TRAVEL: Tick = Tick::from_millis(500);
    /// Damage dealt by every attack: ten hits defeat a full actor.
    pub const ATTACK_DAMAGE: Permille = Permille(100);

    /// Builds a catalog, rejecting duplicate ids, zero cooldowns, empty or
    /// instantaneous heal-over-time schedules and effects that do not match
    /// their declared category.
    pub fn new(skills: Vec<Skill>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(skills.len());

        for (position, skill) in skills.iter().enumerate() {
            if skill.cooldown == Tick::ZERO {
                return Err(CatalogError::ZeroCooldown(skill.id));
            }

            if let SkillEffect::HealOverTime {
                pulses, interval, ..
            } = skill.effect
            {
                if pulses == 0 {
                    return Err(CatalogError::ZeroPulses(skill.id));
                }
                if interval == Tick::ZERO {
                    return Err(CatalogError::ZeroInterval(skill.id));
                }
            }

            let effect = skill.effect.category();
            if effect != skill.category {
                return Err(CatalogError::CategoryMismatch {
                    id: skill.id,
                    declared: skill.category,
                    effect,
                });
            }

            if index.insert(skill.id, position).is_some() {
                return Err(CatalogError::DuplicateSkill(skill.id));
            }
        }

        Ok(Self { skills, index })
    }

    /// Looks a skill up by its string key.
    pub fn get(&self, id: &str) -> Result<&Skill, CatalogError> {
        id.parse::<SkillId>()
            .ok()
            .and_then(|id| self.skill(id))
            .ok_or_else(|| CatalogError::UnknownSkill(id.to_string()))
    }

    /// Looks a skill up by typed id. `None` if this catalog omits it.
    pub fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.index.get(&id).map(|&position| &self.skills[position])
    }

    /// Skills of one category in catalog order.
    pub fn list_by_category(&self, category: SkillCategory) -> impl Iterator<Item = &Skill> + '_ {
        self.skills
            .iter()
            .filter(move |skill| skill.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Checks that every skill is affordable by a full actor.
    pub fn validate_costs(&self, max_energy: u32) -> Result<(), CatalogError> {
        match self.skills.iter().find(|s| s.energy_cost > max_energy) {
            Some(skill) => Err(CatalogError::CostExceedsMaxEnergy {
                id: skill.id,
                cost: skill.energy_cost,
                max_energy,
            }),
            None => Ok(()),
        }
    }

    /// The stock twenty-skill catalog.
    pub fn builtin() -> Self {
        Self::new(builtin_skills()).unwrap_or_else(|_| unreachable!("builtin catalog is valid"))
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn attack(id: SkillId, name: &str, cooldown_ms: u64, cost: u32) -> Skill {
    Skill::new(
        id,
        name,
        SkillCategory::Attack,
        Tick::from_millis(cooldown_ms),
        cost,
        SkillEffect::Damage {
            amount: SkillCatalog::ATTACK_DAMAGE,
            travel: SkillCatalog::ATTACK_TRAVEL,
        },
    )
}

fn guard(
    id: SkillId,
    name: &str,
    cooldown_ms: u64,
    cost: u32,
    buff: DefenseBuff,
    duration_ms: u64,
) -> Skill {
    Skill::new(
        id,
        name,
        SkillCategory::Defense,
        Tick::from_millis(cooldown_ms),
        cost,
        SkillEffect::Guard {
            buff,
            duration: Tick::from_millis(duration_ms),
        },
    )
}

fn recovery(id: SkillId, name: &str, cooldown_ms: u64, cost: u32, effect: SkillEffect) -> Skill {
    Skill::new(
        id,
        name,
        SkillCategory::Recovery,
        Tick::from_millis(cooldown_ms),
        cost,
        effect,
    )
}

fn builtin_skills() -> Vec<Skill> {
    use SkillId::*;

    vec![
        attack(Fireball, "Fireball", 3_000, 20),
        attack(Lightning, "Lightning", 2_500, 15),
        attack(IceSpike, "Ice Spike", 2_000, 12),
        attack(ShadowStrike, "Shadow Strike", 4_000, 25),
        attack(EarthQuake, "Earth Quake", 5_000, 30),
        attack(WindSlash, "Wind Slash", 1_500, 10),
        attack(PoisonDart, "Poison Dart", 3_500, 18),
        attack(HolySmite, "Holy Smite", 6_000, 35),
        attack(DarkVoid, "Dark Void", 7_000, 40),
        attack(Meteor, "Meteor", 8_000, 45),
        guard(Shield, "Shield", 4_000, 20, DefenseBuff::Shield, 3_000),
        guard(Barrier, "Barrier", 5_000, 25, DefenseBuff::Barrier, 4_000),
        guard(Dodge, "Dodge", 2_000, 15, DefenseBuff::Dodge, 400),
        guard(Reflect, "Reflect", 6_000, 30, DefenseBuff::Reflect, 5_000),
        guard(Immunity, "Immunity", 10_000, 40, DefenseBuff::Immunity, 6_000),
        recovery(
            Heal,
            "Heal",
            3_000,
            15,
            SkillEffect::Heal {
                amount: Permille(300),
                delay: Tick::from_millis(1_000),
            },
        ),
        recovery(
            Regeneration,
            "Regeneration",
            8_000,
            25,
            SkillEffect::HealOverTime {
                per_pulse: Permille(50),
                pulses: 8,
                interval: Tick::from_millis(500),
            },
        ),
        recovery(
            EnergyBoost,
            "Energy Boost",
            5_000,
            10,
            SkillEffect::RestoreEnergy {
                amount: Permille(300),
                delay: Tick::from_millis(500),
            },
        ),
        recovery(
            Cleanse,
            "Cleanse",
            4_000,
            20,
            SkillEffect::Cleanse {
                delay: Tick::from_millis(300),
            },
        ),
        recovery(
            Revive,
            "Revive",
            15_000,
            50,
            SkillEffect::Revive {
                delay: Tick::from_millis(1_300),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn builtin_skills_pass_validation() {
        assert_eq!(
            SkillCatalog::new(builtin_skills()).map(|catalog| catalog.len()),
            Ok(20)
        );
    }

    #[test]
    fn builtin_covers_every_skill_id() {
        let catalog = SkillCatalog::builtin();
        assert_eq!(catalog.len(), SkillId::iter().count());
        for id in SkillId::iter() {
            assert!(catalog.skill(id).is_some(), "missing {id}");
        }
    }

    #[test]
    fn lookup_by_string_key() {
        let catalog = SkillCatalog::builtin();
        let skill = catalog.get("ice_spike").unwrap();
        assert_eq!(skill.id, SkillId::IceSpike);
        assert_eq!(skill.energy_cost, 12);

        assert_eq!(
            catalog.get("fire_ball"),
            Err(CatalogError::UnknownSkill("fire_ball".to_string()))
        );
    }

    #[test]
    fn category_listing_keeps_insertion_order() {
        let catalog = SkillCatalog::builtin();
        let defense: Vec<SkillId> = catalog
            .list_by_category(SkillCategory::Defense)
            .map(|s| s.id)
            .collect();
        assert_eq!(
            defense,
            vec![
                SkillId::Shield,
                SkillId::Barrier,
                SkillId::Dodge,
                SkillId::Reflect,
                SkillId::Immunity
            ]
        );
        assert_eq!(catalog.list_by_category(SkillCategory::Attack).count(), 10);
        assert_eq!(catalog.list_by_category(SkillCategory::Recovery).count(), 5);
    }

    #[test]
    fn every_cost_fits_default_energy() {
        let catalog = SkillCatalog::builtin();
        assert!(catalog.validate_costs(100).is_ok());
        assert!(matches!(
            catalog.validate_costs(40),
            Err(CatalogError::CostExceedsMaxEnergy { .. })
        ));
    }

    #[test]
    fn rejects_duplicates_and_zero_cooldowns() {
        let twice = vec![
            attack(SkillId::Fireball, "Fireball", 3_000, 20),
            attack(SkillId::Fireball, "Fireball again", 3_000, 20),
        ];
        assert_eq!(
            SkillCatalog::new(twice),
            Err(CatalogError::DuplicateSkill(SkillId::Fireball))
        );

        let instant = vec![attack(SkillId::Lightning, "Lightning", 0, 15)];
        assert_eq!(
            SkillCatalog::new(instant),
            Err(CatalogError::ZeroCooldown(SkillId::Lightning))
        );
    }

    fn regeneration(pulses: u8, interval_ms: u64) -> Skill {
        recovery(
            SkillId::Regeneration,
            "Regeneration",
            8_000,
            25,
            SkillEffect::HealOverTime {
                per_pulse: Permille(50),
                pulses,
                interval: Tick::from_millis(interval_ms),
            },
        )
    }

    #[test]
    fn rejects_heal_over_time_that_cannot_pulse() {
        assert_eq!(
            SkillCatalog::new(vec![regeneration(8, 0)]),
            Err(CatalogError::ZeroInterval(SkillId::Regeneration))
        );
        assert_eq!(
            SkillCatalog::new(vec![regeneration(0, 500)]),
            Err(CatalogError::ZeroPulses(SkillId::Regeneration))
        );
        assert!(SkillCatalog::new(vec![regeneration(8, 500)]).is_ok());
    }

    #[test]
    fn rejects_effect_in_wrong_category() {
        let mut skill = attack(SkillId::Heal, "Heal", 3_000, 15);
        skill.category = SkillCategory::Recovery;
        assert!(matches!(
            SkillCatalog::new(vec![skill]),
            Err(CatalogError::CategoryMismatch { .. })
        ));
    }
}
