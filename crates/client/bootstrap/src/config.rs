//! Client runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use battle_core::{BattleConfig, LockPreset};

/// Configuration required to bootstrap a client runtime.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub channels: ChannelConfig,
    pub content: ContentPaths,
    /// Overrides the lock table of the loaded battle config.
    pub lock_preset: Option<LockPreset>,
    /// Zero disables the background ticker.
    pub tick_interval: Duration,
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            channels: ChannelConfig::default(),
            content: ContentPaths::default(),
            lock_preset: None,
            tick_interval: Duration::from_millis(100),
            session_id: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_CONFIG_PATH` - Battle rules TOML (default: embedded)
    /// - `BATTLE_SKILLS_PATH` - Skill catalog RON (default: embedded)
    /// - `BATTLE_DATA_DIR` - Directory holding `battle.toml` / `skills.ron`
    /// - `BATTLE_LOCK_PRESET` - `standard` or `quick` (default: from config)
    /// - `BATTLE_TICK_INTERVAL_MS` - Background tick period (default: 100)
    /// - `RUNTIME_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `RUNTIME_COMMAND_BUFFER` - Worker command queue size (default: 32)
    /// - `GAME_SESSION_ID` - Session identifier for log files (default: auto-generated)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let parse = |key: &str| read(key).and_then(|value| value.trim().parse::<u64>().ok());

        let mut config = Self::default();

        // Channel configuration
        if let Some(capacity) = parse("RUNTIME_EVENT_BUFFER") {
            config.channels.event_buffer = to_capacity(capacity);
        }
        if let Some(capacity) = parse("RUNTIME_COMMAND_BUFFER") {
            config.channels.command_buffer = to_capacity(capacity);
        }

        // Content sources
        config.content.config_path = read("BATTLE_CONFIG_PATH").map(PathBuf::from);
        config.content.skills_path = read("BATTLE_SKILLS_PATH").map(PathBuf::from);
        config.content.data_dir = read("BATTLE_DATA_DIR").map(PathBuf::from);

        if let Some(name) = read("BATTLE_LOCK_PRESET") {
            config.lock_preset = LockPreset::named(name.trim());
            if config.lock_preset.is_none() {
                tracing::warn!(preset = %name, "unknown lock preset, keeping configured lock");
            }
        }

        if let Some(millis) = parse("BATTLE_TICK_INTERVAL_MS") {
            config.tick_interval = Duration::from_millis(millis);
        }

        config.session_id = read("GAME_SESSION_ID");

        config
    }

    /// Runtime settings for a match played under `battle`.
    pub fn runtime_config(&self, battle: BattleConfig) -> runtime::RuntimeConfig {
        runtime::RuntimeConfig {
            battle,
            event_buffer_size: self.channels.event_buffer,
            command_buffer_size: self.channels.command_buffer,
            tick_interval: (!self.tick_interval.is_zero()).then_some(self.tick_interval),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChannelConfig {
    pub event_buffer: usize,
    pub command_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            event_buffer: 100,
            command_buffer: 32,
        }
    }
}

/// Where battle content is read from. Unset entries use embedded content.
#[derive(Clone, Debug, Default)]
pub struct ContentPaths {
    pub config_path: Option<PathBuf>,
    pub skills_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

fn to_capacity(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = from_pairs(&[]);
        assert_eq!(config.channels.event_buffer, 100);
        assert_eq!(config.channels.command_buffer, 32);
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert!(config.lock_preset.is_none());
        assert!(config.content.config_path.is_none());
        assert!(config.session_id.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let config = from_pairs(&[
            ("BATTLE_CONFIG_PATH", "rules/battle.toml"),
            ("BATTLE_SKILLS_PATH", "rules/skills.ron"),
            ("BATTLE_LOCK_PRESET", "quick"),
            ("BATTLE_TICK_INTERVAL_MS", "250"),
            ("RUNTIME_EVENT_BUFFER", "512"),
            ("RUNTIME_COMMAND_BUFFER", "0"),
            ("GAME_SESSION_ID", "duel"),
        ]);

        assert_eq!(
            config.content.config_path,
            Some(PathBuf::from("rules/battle.toml"))
        );
        assert_eq!(
            config.content.skills_path,
            Some(PathBuf::from("rules/skills.ron"))
        );
        assert_eq!(config.lock_preset, Some(LockPreset::QUICK));
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.channels.event_buffer, 512);
        assert_eq!(config.channels.command_buffer, 1);
        assert_eq!(config.session_id.as_deref(), Some("duel"));
    }

    #[test]
    fn ignores_unparseable_values() {
        let config = from_pairs(&[
            ("BATTLE_LOCK_PRESET", "glacial"),
            ("BATTLE_TICK_INTERVAL_MS", "soon"),
            ("GAME_SESSION_ID", "  "),
        ]);
        assert!(config.lock_preset.is_none());
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert!(config.session_id.is_none());
    }

    #[test]
    fn zero_tick_interval_disables_ticker() {
        let config = from_pairs(&[("BATTLE_TICK_INTERVAL_MS", "0")]);
        let runtime = config.runtime_config(BattleConfig::default());
        assert!(runtime.tick_interval.is_none());
    }
}
