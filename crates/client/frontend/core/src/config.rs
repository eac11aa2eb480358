//! Frontend configuration structures and loaders.
//!
//! This module contains UI-specific configuration that is shared across
//! different frontend implementations.

use std::env;

use battle_core::{BattleEvent, EnergySource};

/// Frontend-specific configuration.
///
/// This contains UI-related settings like message filtering and channel buffers.
#[derive(Clone, Debug, Default)]
pub struct FrontendConfig {
    pub channels: ChannelConfig,
    pub messages: MessageConfig,
}

impl FrontendConfig {
    pub const fn new(channels: ChannelConfig, messages: MessageConfig) -> Self {
        Self { channels, messages }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CLI_INPUT_BUFFER` - Pending input line queue size (default: 16)
    /// - `CLI_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    /// - `SHOW_ATTACK_MESSAGES` - Casts, hits, negations, reflections (default: true)
    /// - `SHOW_DEFENSE_MESSAGES` - Buffs applied and expired (default: true)
    /// - `SHOW_RECOVERY_MESSAGES` - Heals, revives, cleanses, energy boosts (default: true)
    /// - `SHOW_LOCK_MESSAGES` - Lock rebates and releases (default: true)
    /// - `SHOW_REGEN_MESSAGES` - Passive energy regeneration (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`FrontendConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        // Channel configuration
        if let Some(capacity) =
            lookup("CLI_INPUT_BUFFER").and_then(|v| v.trim().parse::<usize>().ok())
        {
            config.channels.input_buffer = capacity.max(1);
        }

        // Message configuration
        if let Some(capacity) =
            lookup("CLI_MESSAGE_CAPACITY").and_then(|v| v.trim().parse::<usize>().ok())
        {
            config.messages.capacity = capacity.max(1);
        }

        // Event visibility settings
        let visibility = &mut config.messages.visibility;
        let flags: [(&str, &mut bool); 5] = [
            ("SHOW_ATTACK_MESSAGES", &mut visibility.show_attacks),
            ("SHOW_DEFENSE_MESSAGES", &mut visibility.show_defense),
            ("SHOW_RECOVERY_MESSAGES", &mut visibility.show_recovery),
            ("SHOW_LOCK_MESSAGES", &mut visibility.show_lock),
            ("SHOW_REGEN_MESSAGES", &mut visibility.show_regen),
        ];
        for (key, flag) in flags {
            if let Some(show) = lookup(key).as_deref().and_then(parse_bool) {
                *flag = show;
            }
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct ChannelConfig {
    pub input_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self { input_buffer: 16 }
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
    pub visibility: EventVisibility,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            visibility: EventVisibility::default(),
        }
    }
}

/// Controls which battle events generate visible messages.
///
/// Match lifecycle events (game over, reset) are always shown.
#[derive(Clone, Debug)]
pub struct EventVisibility {
    /// Attack casts and their outcome (e.g., "blue takes 10 damage from fireball").
    pub show_attacks: bool,
    /// Defensive buffs (e.g., "red raises shield until 3.0s").
    pub show_defense: bool,
    /// Recovery casts and their outcome (e.g., "red heals 30").
    pub show_recovery: bool,
    /// Shared lock changes (e.g., "red can act again").
    pub show_lock: bool,
    /// Passive energy regeneration pulses.
    pub show_regen: bool,
}

impl Default for EventVisibility {
    fn default() -> Self {
        Self {
            show_attacks: true,
            show_defense: true,
            show_recovery: true,
            show_lock: true,
            show_regen: false, // Shown in the status block instead
        }
    }
}

impl EventVisibility {
    /// Returns true if a message should be generated for this event.
    pub fn should_show(&self, event: &BattleEvent) -> bool {
        use battle_core::SkillCategory;

        match event {
            BattleEvent::SkillCast { effect, .. } => match effect.category {
                SkillCategory::Attack => self.show_attacks,
                SkillCategory::Defense => self.show_defense,
                SkillCategory::Recovery => self.show_recovery,
            },
            BattleEvent::DamageLanded { .. }
            | BattleEvent::AttackNegated { .. }
            | BattleEvent::AttackReflected { .. } => self.show_attacks,
            BattleEvent::BuffApplied { .. } | BattleEvent::BuffExpired { .. } => self.show_defense,
            BattleEvent::EnergyRestored {
                source: EnergySource::Regeneration,
                ..
            } => self.show_regen,
            BattleEvent::Healed { .. }
            | BattleEvent::EnergyRestored { .. }
            | BattleEvent::Revived { .. }
            | BattleEvent::Cleansed { .. } => self.show_recovery,
            BattleEvent::LockRebated { .. } | BattleEvent::LockReleased { .. } => self.show_lock,
            BattleEvent::GameOver { .. } | BattleEvent::MatchReset { .. } => true,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{ActorId, Tick};

    #[test]
    fn toggles_parse_common_spellings() {
        let config = FrontendConfig::from_lookup(|key| match key {
            "SHOW_LOCK_MESSAGES" => Some("off".into()),
            "SHOW_REGEN_MESSAGES" => Some("YES".into()),
            "SHOW_ATTACK_MESSAGES" => Some("maybe".into()),
            "CLI_MESSAGE_CAPACITY" => Some("0".into()),
            _ => None,
        });

        let visibility = &config.messages.visibility;
        assert!(!visibility.show_lock);
        assert!(visibility.show_regen);
        assert!(visibility.show_attacks);
        assert_eq!(config.messages.capacity, 1);
        assert_eq!(config.channels.input_buffer, 16);
    }

    #[test]
    fn regen_pulses_hidden_by_default() {
        let visibility = EventVisibility::default();
        let regen = BattleEvent::EnergyRestored {
            at: Tick::from_secs(1),
            actor: ActorId::Red,
            source: EnergySource::Regeneration,
            amount: 5,
            energy_after: 85,
        };
        let game_over = BattleEvent::GameOver {
            at: Tick::from_secs(2),
            winner: ActorId::Blue,
        };

        assert!(!visibility.should_show(&regen));
        assert!(visibility.should_show(&game_over));
    }
}
