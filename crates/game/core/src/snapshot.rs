//! Serializable read-only views of a match.

use crate::skill::SkillId;
use crate::state::{
    ActionLock, ActorId, ActorState, BattleState, BuffFlags, MatchStatus, ResourceMeter, Tick,
};

/// Lock as seen at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LockView {
    Idle,
    Locked { until: Tick, remaining: Tick },
}

impl LockView {
    fn at(lock: &ActionLock, now: Tick) -> Self {
        match lock.until() {
            Some(until) if lock.is_locked(now) => LockView::Locked {
                until,
                remaining: until.saturating_sub(now),
            },
            _ => LockView::Idle,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, LockView::Locked { .. })
    }

    pub fn remaining(&self) -> Tick {
        match self {
            LockView::Idle => Tick::ZERO,
            LockView::Locked { remaining, .. } => *remaining,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorView {
    pub id: ActorId,
    pub health: ResourceMeter,
    pub energy: ResourceMeter,
    pub lock: LockView,
    pub buffs: BuffFlags,
    /// Skills still cooling, with remaining time, in id order.
    pub cooldowns: Vec<(SkillId, Tick)>,
}

impl ActorView {
    fn capture(actor: &ActorState, now: Tick) -> Self {
        Self {
            id: actor.id,
            health: actor.health,
            energy: actor.energy,
            lock: LockView::at(&actor.lock, now),
            buffs: actor.buffs.flags_at(now),
            cooldowns: actor.cooldowns.cooling_at(now).collect(),
        }
    }

    /// Remaining per-skill cooldown; zero when ready.
    pub fn cooldown(&self, skill: SkillId) -> Tick {
        self.cooldowns
            .iter()
            .find(|(id, _)| *id == skill)
            .map(|(_, remaining)| *remaining)
            .unwrap_or(Tick::ZERO)
    }
}

/// Everything a UI needs to render one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleStateView {
    pub now: Tick,
    pub status: MatchStatus,
    pub actors: [ActorView; 2],
    pub pending_effects: usize,
}

impl BattleStateView {
    pub fn capture(state: &BattleState, now: Tick, pending_effects: usize) -> Self {
        Self {
            now,
            status: state.status,
            actors: ActorId::ALL.map(|id| ActorView::capture(state.actor(id), now)),
            pending_effects,
        }
    }

    pub fn actor(&self, id: ActorId) -> &ActorView {
        &self.actors[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_view_counts_down_then_idles() {
        let mut state = BattleState::new(100, 100);
        state.actor_mut(ActorId::Red).lock = ActionLock::engage(Tick::ZERO, Tick::from_secs(3));

        let view = BattleStateView::capture(&state, Tick::from_millis(1_200), 0);
        assert_eq!(
            view.actor(ActorId::Red).lock,
            LockView::Locked {
                until: Tick::from_secs(3),
                remaining: Tick::from_millis(1_800),
            }
        );
        assert_eq!(view.actor(ActorId::Blue).lock, LockView::Idle);

        let later = BattleStateView::capture(&state, Tick::from_secs(3), 0);
        assert_eq!(later.actor(ActorId::Red).lock, LockView::Idle);
    }
}
