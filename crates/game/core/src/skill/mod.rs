//! Skill definitions.
//!
//! A [`Skill`] is an immutable catalog entry. What a skill does is carried as
//! data in [`SkillEffect`], so resolution is a table lookup on the catalog
//! rather than a match on skill names.

mod catalog;

pub use catalog::{CatalogError, SkillCatalog};

use crate::state::{DefenseBuff, Permille, Tick};

/// Identifier of every skill the game knows about.
///
/// The string form (`"fireball"`, `"ice_spike"`, ...) is the key used by UI
/// layers and content files.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkillId {
    // Attack
    Fireball,
    Lightning,
    IceSpike,
    ShadowStrike,
    EarthQuake,
    WindSlash,
    PoisonDart,
    HolySmite,
    DarkVoid,
    Meteor,

    // Defense
    Shield,
    Barrier,
    Dodge,
    Reflect,
    Immunity,

    // Recovery
    Heal,
    Regeneration,
    EnergyBoost,
    Cleanse,
    Revive,
}

impl SkillId {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Broad grouping used for targeting and display.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillCategory {
    Attack,
    Defense,
    Recovery,
}

impl SkillCategory {
    /// Attacks land on the opponent; everything else on the caster.
    pub const fn targets_opponent(self) -> bool {
        matches!(self, SkillCategory::Attack)
    }
}

/// The state transition a skill produces once it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// Removes `amount` of the target's max health after `travel`.
    Damage { amount: Permille, travel: Tick },
    /// Grants a defensive buff to the caster for `duration`.
    Guard { buff: DefenseBuff, duration: Tick },
    /// Restores `amount` of max health after `delay`.
    Heal { amount: Permille, delay: Tick },
    /// Restores `per_pulse` of max health every `interval`, `pulses` times.
    HealOverTime {
        per_pulse: Permille,
        pulses: u8,
        interval: Tick,
    },
    /// Restores `amount` of max energy after `delay`.
    RestoreEnergy { amount: Permille, delay: Tick },
    /// Sets health to its maximum after `delay`, whatever it was.
    Revive { delay: Tick },
    /// Reported after `delay`; changes nothing.
    Cleanse { delay: Tick },
}

impl SkillEffect {
    /// Offset from the cast to the first state change.
    pub const fn lands_after(&self) -> Tick {
        match *self {
            SkillEffect::Damage { travel, .. } => travel,
            SkillEffect::Guard { .. } => Tick::ZERO,
            SkillEffect::Heal { delay, .. } => delay,
            SkillEffect::HealOverTime { interval, .. } => interval,
            SkillEffect::RestoreEnergy { delay, .. } => delay,
            SkillEffect::Revive { delay } => delay,
            SkillEffect::Cleanse { delay } => delay,
        }
    }

    /// Category this effect is legal for.
    pub const fn category(&self) -> SkillCategory {
        match self {
            SkillEffect::Damage { .. } => SkillCategory::Attack,
            SkillEffect::Guard { .. } => SkillCategory::Defense,
            SkillEffect::Heal { .. }
            | SkillEffect::HealOverTime { .. }
            | SkillEffect::RestoreEnergy { .. }
            | SkillEffect::Revive { .. }
            | SkillEffect::Cleanse { .. } => SkillCategory::Recovery,
        }
    }
}

/// Immutable catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub category: SkillCategory,
    /// Per-skill cooldown. Only gates casts under
    /// [`CooldownRule::SharedLockAndPerSkill`](crate::config::CooldownRule).
    pub cooldown: Tick,
    pub energy_cost: u32,
    pub effect: SkillEffect,
}

impl Skill {
    pub fn new(
        id: SkillId,
        name: impl Into<String>,
        category: SkillCategory,
        cooldown: Tick,
        energy_cost: u32,
        effect: SkillEffect,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            cooldown,
            energy_cost,
            effect,
        }
    }
}
