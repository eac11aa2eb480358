//! Deterministic battle rules and data types shared across clients.
//!
//! `battle-core` defines the canonical rules for a two-actor real-time skill
//! battle and exposes a pure, synchronous API: the host passes the current
//! time into every call and the engine never sleeps or reads a clock. All
//! state mutation flows through [`engine::BattleEngine`]; UI layers observe
//! it through [`event::BattleObserver`] or read [`snapshot::BattleStateView`].
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod skill;
pub mod snapshot;
pub mod state;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{
    BattleConfig, ConfigError, CooldownRule, DefenseRule, EnergyRegen, LockPreset, Rebate,
};
pub use engine::{BattleEngine, BuildError, CastError, Scheduler, TimerId};
pub use error::{ErrorSeverity, GameError};
pub use event::{AppliedEffect, BattleEvent, BattleObserver, EnergySource, ObserverId};
pub use skill::{CatalogError, Skill, SkillCatalog, SkillCategory, SkillEffect, SkillId};
pub use snapshot::{ActorView, BattleStateView, LockView};
pub use state::{
    ActionLock, ActorId, ActorState, BattleState, BuffFlags, DefenseBuff, MatchStatus, Permille,
    ResourceMeter, SkillCooldowns, Tick,
};
