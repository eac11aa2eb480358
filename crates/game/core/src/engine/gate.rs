//! Cast admission checks.
//!
//! Runs against the state after the timeline has been advanced to `now` and
//! mutates nothing, so a rejected cast leaves no trace.

use super::CastError;
use crate::config::{BattleConfig, CooldownRule};
use crate::skill::Skill;
use crate::state::{ActorId, BattleState, MatchStatus, Tick};

/// Refuses casts once the match has a winner.
pub(super) fn ensure_in_progress(state: &BattleState) -> Result<(), CastError> {
    match state.status {
        MatchStatus::InProgress => Ok(()),
        MatchStatus::GameOver { winner } => Err(CastError::MatchOver { winner }),
    }
}

/// Checks energy, the per-skill cooldown (when enabled) and the shared lock,
/// in that order.
pub(super) fn admit(
    state: &BattleState,
    config: &BattleConfig,
    caster: ActorId,
    skill: &Skill,
    now: Tick,
) -> Result<(), CastError> {
    let actor = state.actor(caster);

    if actor.energy.current < skill.energy_cost {
        return Err(CastError::InsufficientEnergy {
            actor: caster,
            required: skill.energy_cost,
            available: actor.energy.current,
        });
    }

    if config.cooldowns == CooldownRule::SharedLockAndPerSkill
        && !actor.cooldowns.is_ready(skill.id, now)
        && let Some(until) = actor.cooldowns.ready_at(skill.id)
    {
        return Err(CastError::SkillCoolingDown {
            actor: caster,
            skill: skill.id,
            until,
        });
    }

    if actor.lock.is_locked(now)
        && let Some(until) = actor.lock.until()
    {
        return Err(CastError::ActorLocked {
            actor: caster,
            until,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{SkillCatalog, SkillId};
    use crate::state::ActionLock;

    #[test]
    fn energy_is_checked_before_lock() {
        let catalog = SkillCatalog::builtin();
        let meteor = catalog.skill(SkillId::Meteor).unwrap();
        let config = BattleConfig::new();

        let mut state = BattleState::new(100, 100);
        let red = state.actor_mut(ActorId::Red);
        red.energy.set(10);
        red.lock = ActionLock::engage(Tick::ZERO, Tick::from_secs(30));

        assert_eq!(
            admit(&state, &config, ActorId::Red, meteor, Tick::from_secs(1)),
            Err(CastError::InsufficientEnergy {
                actor: ActorId::Red,
                required: 45,
                available: 10,
            })
        );
    }

    #[test]
    fn per_skill_cooldown_only_under_its_rule() {
        let catalog = SkillCatalog::builtin();
        let dodge = catalog.skill(SkillId::Dodge).unwrap();

        let mut state = BattleState::new(100, 100);
        state
            .actor_mut(ActorId::Blue)
            .cooldowns
            .start(SkillId::Dodge, Tick::ZERO, dodge.cooldown);

        let shared = BattleConfig::new();
        assert_eq!(
            admit(&state, &shared, ActorId::Blue, dodge, Tick::from_secs(1)),
            Ok(())
        );

        let strict = BattleConfig::new().with_cooldowns(CooldownRule::SharedLockAndPerSkill);
        assert_eq!(
            admit(&state, &strict, ActorId::Blue, dodge, Tick::from_secs(1)),
            Err(CastError::SkillCoolingDown {
                actor: ActorId::Blue,
                skill: SkillId::Dodge,
                until: Tick::from_secs(2),
            })
        );
        assert_eq!(
            admit(&state, &strict, ActorId::Blue, dodge, Tick::from_secs(2)),
            Ok(())
        );
    }

    #[test]
    fn game_over_blocks_everything() {
        let mut state = BattleState::new(100, 100);
        state.status = MatchStatus::GameOver {
            winner: ActorId::Blue,
        };
        assert_eq!(
            ensure_in_progress(&state),
            Err(CastError::MatchOver {
                winner: ActorId::Blue
            })
        );
    }
}
