//! Battle configuration: resource maxima, lock presets and rule variants.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Tick;

/// One-shot shortening of an in-progress lock.
///
/// Both offsets are measured from the lock start: when the clock reaches
/// `start + at` and the lock is still engaged, its end moves to
/// `start + shorten_to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rebate {
    pub at: Tick,
    pub shorten_to: Tick,
}

/// Duration of the shared action lock, with an optional rebate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LockPreset {
    pub duration: Tick,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rebate: Option<Rebate>,
}

impl LockPreset {
    /// 30 second lock, cut to 10 seconds once 5 seconds have elapsed.
    pub const STANDARD: Self = Self {
        duration: Tick::from_secs(30),
        rebate: Some(Rebate {
            at: Tick::from_secs(5),
            shorten_to: Tick::from_secs(10),
        }),
    };

    /// 3 second lock, no rebate.
    pub const QUICK: Self = Self {
        duration: Tick::from_secs(3),
        rebate: None,
    };

    /// Resolves a preset by name (`standard` or `quick`).
    pub fn named(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::STANDARD),
            "quick" => Some(Self::QUICK),
            _ => None,
        }
    }
}

impl Default for LockPreset {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Which cooldowns gate a cast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CooldownRule {
    /// Only the shared per-actor lock blocks casts. Per-skill cooldowns are
    /// still recorded and reported.
    #[default]
    SharedLock,
    /// The shared lock and the skill's own cooldown both block casts.
    SharedLockAndPerSkill,
}

/// Whether defensive buffs change how attacks land.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DefenseRule {
    /// Buffs are tracked and reported only.
    #[default]
    Cosmetic,
    /// An active buff negates a landed hit; an active reflect also sends the
    /// hit back to the caster.
    Mitigating,
}

/// Passive energy regeneration applied to both actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyRegen {
    pub amount: u32,
    pub interval: Tick,
}

/// Errors raised by [`BattleConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max health must be positive")]
    ZeroMaxHealth,

    #[error("max energy must be positive")]
    ZeroMaxEnergy,

    #[error("lock duration must be positive")]
    ZeroLockDuration,

    #[error("rebate at {at} must fall inside the {duration} lock")]
    RebateOutsideLock { at: Tick, duration: Tick },

    #[error("rebate must shorten the lock to between {at} and {duration}, got {shorten_to}")]
    RebateNotShortening {
        at: Tick,
        shorten_to: Tick,
        duration: Tick,
    },

    #[error("energy regeneration interval must be positive")]
    ZeroRegenInterval,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ZeroMaxHealth => "CONFIG_ZERO_MAX_HEALTH",
            ConfigError::ZeroMaxEnergy => "CONFIG_ZERO_MAX_ENERGY",
            ConfigError::ZeroLockDuration => "CONFIG_ZERO_LOCK_DURATION",
            ConfigError::RebateOutsideLock { .. } => "CONFIG_REBATE_OUTSIDE_LOCK",
            ConfigError::RebateNotShortening { .. } => "CONFIG_REBATE_NOT_SHORTENING",
            ConfigError::ZeroRegenInterval => "CONFIG_ZERO_REGEN_INTERVAL",
        }
    }
}

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    pub max_health: u32,
    pub max_energy: u32,
    pub lock: LockPreset,
    pub cooldowns: CooldownRule,
    pub defense: DefenseRule,
    pub energy_regen: Option<EnergyRegen>,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per defensive buff kind.
    pub const MAX_BUFFS: usize = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_HEALTH: u32 = 100;
    pub const DEFAULT_MAX_ENERGY: u32 = 100;

    pub fn new() -> Self {
        Self {
            max_health: Self::DEFAULT_MAX_HEALTH,
            max_energy: Self::DEFAULT_MAX_ENERGY,
            lock: LockPreset::STANDARD,
            cooldowns: CooldownRule::SharedLock,
            defense: DefenseRule::Cosmetic,
            energy_regen: None,
        }
    }

    pub fn with_lock(mut self, lock: LockPreset) -> Self {
        self.lock = lock;
        self
    }

    pub fn with_cooldowns(mut self, cooldowns: CooldownRule) -> Self {
        self.cooldowns = cooldowns;
        self
    }

    pub fn with_defense(mut self, defense: DefenseRule) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_energy_regen(mut self, energy_regen: Option<EnergyRegen>) -> Self {
        self.energy_regen = energy_regen;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::ZeroMaxHealth);
        }
        if self.max_energy == 0 {
            return Err(ConfigError::ZeroMaxEnergy);
        }

        let duration = self.lock.duration;
        if duration == Tick::ZERO {
            return Err(ConfigError::ZeroLockDuration);
        }

        if let Some(Rebate { at, shorten_to }) = self.lock.rebate {
            if at == Tick::ZERO || at >= duration {
                return Err(ConfigError::RebateOutsideLock { at, duration });
            }
            if shorten_to <= at || shorten_to >= duration {
                return Err(ConfigError::RebateNotShortening {
                    at,
                    shorten_to,
                    duration,
                });
            }
        }

        if let Some(regen) = self.energy_regen
            && regen.interval == Tick::ZERO
        {
            return Err(ConfigError::ZeroRegenInterval);
        }

        Ok(())
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert!(BattleConfig::new().validate().is_ok());
        assert!(
            BattleConfig::new()
                .with_lock(LockPreset::QUICK)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn rebate_must_land_inside_and_shorten() {
        let late = LockPreset {
            duration: Tick::from_secs(3),
            rebate: Some(Rebate {
                at: Tick::from_secs(5),
                shorten_to: Tick::from_secs(10),
            }),
        };
        assert!(matches!(
            BattleConfig::new().with_lock(late).validate(),
            Err(ConfigError::RebateOutsideLock { .. })
        ));

        let lengthening = LockPreset {
            duration: Tick::from_secs(30),
            rebate: Some(Rebate {
                at: Tick::from_secs(5),
                shorten_to: Tick::from_secs(40),
            }),
        };
        assert!(matches!(
            BattleConfig::new().with_lock(lengthening).validate(),
            Err(ConfigError::RebateNotShortening { .. })
        ));
    }

    #[test]
    fn named_presets() {
        assert_eq!(LockPreset::named("Quick"), Some(LockPreset::QUICK));
        assert_eq!(LockPreset::named(" standard "), Some(LockPreset::STANDARD));
        assert_eq!(LockPreset::named("slow"), None);
    }
}
