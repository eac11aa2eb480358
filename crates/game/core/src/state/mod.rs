//! Authoritative battle state representation.
//!
//! This module owns the two actors and the match status. Runtime layers clone
//! or query this state but mutate it exclusively through the engine.
pub mod types;

pub use types::{
    ActionLock, ActiveBuff, ActiveBuffs, ActorId, ActorState, BuffFlags, DefenseBuff, Permille,
    ResourceMeter, SkillCooldowns, Tick,
};

/// Whether a match still accepts casts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchStatus {
    #[default]
    InProgress,
    GameOver {
        winner: ActorId,
    },
}

impl MatchStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, MatchStatus::GameOver { .. })
    }

    pub fn winner(&self) -> Option<ActorId> {
        match self {
            MatchStatus::InProgress => None,
            MatchStatus::GameOver { winner } => Some(*winner),
        }
    }
}

/// Canonical snapshot of one match.
///
/// Invariants: health and energy stay within `[0, maximum]`; per-skill
/// cooldown remaining is never negative (stored as deadlines).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    actors: [ActorState; 2],
    pub status: MatchStatus,
}

impl BattleState {
    /// Creates a match with both actors at full health and energy.
    pub fn new(max_health: u32, max_energy: u32) -> Self {
        Self {
            actors: ActorId::ALL.map(|id| ActorState::new(id, max_health, max_energy)),
            status: MatchStatus::InProgress,
        }
    }

    pub fn actor(&self, id: ActorId) -> &ActorState {
        &self.actors[id.index()]
    }

    pub fn actor_mut(&mut self, id: ActorId) -> &mut ActorState {
        &mut self.actors[id.index()]
    }

    pub fn actors(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.iter()
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Latches `GameOver` if either actor has no health left.
    ///
    /// Returns the winner when this call performed the transition. Once
    /// latched the status does not change until [`BattleState::restore`].
    pub fn latch_game_over(&mut self) -> Option<ActorId> {
        if self.is_over() {
            return None;
        }

        let loser = self.actors.iter().find(|a| a.is_defeated())?.id;
        let winner = loser.opponent();
        self.status = MatchStatus::GameOver { winner };
        Some(winner)
    }

    /// Returns both actors to full resources and the match to `InProgress`.
    pub fn restore(&mut self) {
        for actor in &mut self.actors {
            actor.restore();
        }
        self.status = MatchStatus::InProgress;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_full_and_in_progress() {
        let state = BattleState::new(100, 80);
        for actor in state.actors() {
            assert_eq!(actor.health, ResourceMeter::full(100));
            assert_eq!(actor.energy, ResourceMeter::full(80));
            assert_eq!(actor.lock, ActionLock::Idle);
        }
        assert_eq!(state.status, MatchStatus::InProgress);
    }

    #[test]
    fn game_over_latches_once() {
        let mut state = BattleState::new(100, 100);
        assert_eq!(state.latch_game_over(), None);

        state.actor_mut(ActorId::Blue).health.drain(100);
        assert_eq!(state.latch_game_over(), Some(ActorId::Red));
        assert_eq!(state.latch_game_over(), None);
        assert_eq!(state.status.winner(), Some(ActorId::Red));

        state.restore();
        assert!(!state.is_over());
        assert!(state.actor(ActorId::Blue).health.is_full());
    }
}
