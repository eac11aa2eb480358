//! Human-readable text for battle events.

use battle_core::{BattleEvent, CastError, EnergySource, SkillCategory, Tick};
use runtime::CastRejected;

use crate::config::EventVisibility;

/// Message for `event`, or `None` when its category is hidden.
pub fn format_event(event: &BattleEvent, visibility: &EventVisibility) -> Option<String> {
    visibility
        .should_show(event)
        .then(|| describe_event(event))
}

/// Message for `event` regardless of visibility settings.
pub fn describe_event(event: &BattleEvent) -> String {
    match event {
        BattleEvent::SkillCast { effect, .. } => match effect.category {
            SkillCategory::Attack => format!(
                "{} casts {} at {} (lands at {})",
                effect.caster,
                effect.skill,
                effect.target,
                seconds(effect.lands_at)
            ),
            _ => format!("{} casts {}", effect.caster, effect.skill),
        },
        BattleEvent::DamageLanded {
            target,
            skill,
            amount,
            health_after,
            ..
        } => format!("{target} takes {amount} damage from {skill} (health {health_after})"),
        BattleEvent::AttackNegated {
            source,
            target,
            skill,
            buff,
            ..
        } => format!("{target}'s {buff} absorbs {skill} from {source}"),
        BattleEvent::AttackReflected {
            source,
            target,
            skill,
            amount,
            source_health_after,
            ..
        } => format!(
            "{target} reflects {skill}: {source} takes {amount} damage (health {source_health_after})"
        ),
        BattleEvent::Healed {
            actor,
            amount,
            health_after,
            pulse: Some((pulse, of)),
            ..
        } => format!("{actor} regenerates {amount} health ({pulse}/{of}, health {health_after})"),
        BattleEvent::Healed {
            actor,
            amount,
            health_after,
            ..
        } => format!("{actor} heals {amount} health (health {health_after})"),
        BattleEvent::EnergyRestored {
            actor,
            source: EnergySource::Skill(_),
            amount,
            energy_after,
            ..
        } => format!("{actor} restores {amount} energy (energy {energy_after})"),
        BattleEvent::EnergyRestored {
            actor,
            amount,
            energy_after,
            ..
        } => format!("{actor} regenerates {amount} energy (energy {energy_after})"),
        BattleEvent::Revived {
            actor,
            health_after,
            ..
        } => format!("{actor} is revived (health {health_after})"),
        BattleEvent::BuffApplied {
            actor,
            buff,
            expires_at,
            ..
        } => format!("{actor} raises {buff} until {}", seconds(*expires_at)),
        BattleEvent::BuffExpired { actor, buff, .. } => format!("{actor}'s {buff} fades"),
        BattleEvent::Cleansed { actor, .. } => format!("{actor} is cleansed"),
        BattleEvent::LockRebated { actor, until, .. } => {
            format!("{actor}'s lock shortened, acts again at {}", seconds(*until))
        }
        BattleEvent::LockReleased { actor, .. } => format!("{actor} can act again"),
        BattleEvent::GameOver { winner, .. } => format!("game over: {winner} wins"),
        BattleEvent::MatchReset { .. } => "a new match begins".to_string(),
    }
}

/// Message explaining why a cast was refused.
pub fn describe_rejection(rejected: &CastRejected) -> String {
    let CastRejected {
        actor,
        skill,
        error,
        ..
    } = rejected;

    let reason = match error {
        CastError::UnknownSkill(_) => format!("unknown skill '{skill}'"),
        CastError::InsufficientEnergy {
            required,
            available,
            ..
        } => format!("needs {required} energy, has {available}"),
        CastError::ActorLocked { until, .. } => format!("locked until {}", seconds(*until)),
        CastError::SkillCoolingDown { until, .. } => {
            format!("{skill} is cooling down until {}", seconds(*until))
        }
        CastError::MatchOver { winner } => format!("the match is over, {winner} won"),
    };
    format!("{actor} cannot cast {skill}: {reason}")
}

/// Match clock as seconds with one decimal, e.g. `12.5s`.
pub fn seconds(at: Tick) -> String {
    let millis = at.as_millis();
    format!("{}.{}s", millis / 1_000, (millis % 1_000) / 100)
}
