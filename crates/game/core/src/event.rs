//! Typed events emitted by the engine and the observer interface UI layers
//! subscribe through.

use crate::skill::{SkillCategory, SkillEffect, SkillId};
use crate::state::{ActorId, DefenseBuff, Tick};

/// What a successful cast committed to.
///
/// Returned to the caller of [`BattleEngine::cast`](crate::BattleEngine::cast)
/// and carried by [`BattleEvent::SkillCast`]. The state change itself happens
/// at `lands_at` (immediately for guards).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedEffect {
    pub caster: ActorId,
    pub target: ActorId,
    pub skill: SkillId,
    pub category: SkillCategory,
    pub effect: SkillEffect,
    pub cast_at: Tick,
    pub lands_at: Tick,
    pub energy_spent: u32,
    pub energy_after: u32,
    pub lock_until: Tick,
}

/// Where restored energy came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnergySource {
    Skill(SkillId),
    Regeneration,
}

/// Everything observable that happens in a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    SkillCast {
        at: Tick,
        effect: AppliedEffect,
    },
    DamageLanded {
        at: Tick,
        source: ActorId,
        target: ActorId,
        skill: SkillId,
        amount: u32,
        health_after: u32,
    },
    /// A landed hit was absorbed by an active buff.
    AttackNegated {
        at: Tick,
        source: ActorId,
        target: ActorId,
        skill: SkillId,
        buff: DefenseBuff,
    },
    /// A landed hit was sent back; `source` took the damage.
    AttackReflected {
        at: Tick,
        source: ActorId,
        target: ActorId,
        skill: SkillId,
        amount: u32,
        source_health_after: u32,
    },
    Healed {
        at: Tick,
        actor: ActorId,
        skill: SkillId,
        amount: u32,
        health_after: u32,
        /// `(pulse, of)` for heal-over-time effects.
        pulse: Option<(u32, u32)>,
    },
    EnergyRestored {
        at: Tick,
        actor: ActorId,
        source: EnergySource,
        amount: u32,
        energy_after: u32,
    },
    Revived {
        at: Tick,
        actor: ActorId,
        health_after: u32,
    },
    BuffApplied {
        at: Tick,
        actor: ActorId,
        buff: DefenseBuff,
        expires_at: Tick,
    },
    BuffExpired {
        at: Tick,
        actor: ActorId,
        buff: DefenseBuff,
    },
    Cleansed {
        at: Tick,
        actor: ActorId,
    },
    LockRebated {
        at: Tick,
        actor: ActorId,
        until: Tick,
    },
    LockReleased {
        at: Tick,
        actor: ActorId,
    },
    GameOver {
        at: Tick,
        winner: ActorId,
    },
    MatchReset {
        at: Tick,
    },
}

impl BattleEvent {
    /// Engine time at which the event happened.
    pub fn at(&self) -> Tick {
        match self {
            BattleEvent::SkillCast { at, .. }
            | BattleEvent::DamageLanded { at, .. }
            | BattleEvent::AttackNegated { at, .. }
            | BattleEvent::AttackReflected { at, .. }
            | BattleEvent::Healed { at, .. }
            | BattleEvent::EnergyRestored { at, .. }
            | BattleEvent::Revived { at, .. }
            | BattleEvent::BuffApplied { at, .. }
            | BattleEvent::BuffExpired { at, .. }
            | BattleEvent::Cleansed { at, .. }
            | BattleEvent::LockRebated { at, .. }
            | BattleEvent::LockReleased { at, .. }
            | BattleEvent::GameOver { at, .. }
            | BattleEvent::MatchReset { at } => *at,
        }
    }

    /// True for events that report the shared action lock.
    pub fn is_lock_event(&self) -> bool {
        matches!(
            self,
            BattleEvent::LockRebated { .. } | BattleEvent::LockReleased { .. }
        )
    }

    /// True for events that changed health.
    pub fn changes_health(&self) -> bool {
        matches!(
            self,
            BattleEvent::DamageLanded { .. }
                | BattleEvent::AttackReflected { .. }
                | BattleEvent::Healed { .. }
                | BattleEvent::Revived { .. }
        )
    }
}

/// Receives every event the engine emits, in emission order.
pub trait BattleObserver: Send {
    fn on_event(&mut self, event: &BattleEvent);
}

impl<F> BattleObserver for F
where
    F: FnMut(&BattleEvent) + Send,
{
    fn on_event(&mut self, event: &BattleEvent) {
        self(event)
    }
}

/// Handle returned by [`BattleEngine::subscribe`](crate::BattleEngine::subscribe).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Ordered set of observers.
#[derive(Default)]
pub(crate) struct Observers {
    entries: Vec<(ObserverId, Box<dyn BattleObserver>)>,
    next_id: u64,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Box<dyn BattleObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, event: &BattleEvent) {
        for (_, observer) in &mut self.entries {
            observer.on_event(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
