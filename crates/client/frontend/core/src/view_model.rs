//! View-model snapshots derived from [`BattleStateView`].
use battle_core::{ActorId, BattleStateView, MatchStatus, ResourceMeter, SkillId, Tick};

/// High-level snapshot of the match used by presentation layers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleViewModel {
    pub now: Tick,
    pub status: MatchStatus,
    pub actors: [ActorPanel; 2],
    pub pending_effects: usize,
}

impl BattleViewModel {
    pub fn from_view(view: &BattleStateView) -> Self {
        Self {
            now: view.now,
            status: view.status,
            actors: ActorId::ALL.map(|id| ActorPanel::from_view(view, id)),
            pending_effects: view.pending_effects,
        }
    }

    pub fn actor(&self, id: ActorId) -> &ActorPanel {
        &self.actors[id.index()]
    }

    /// One-line match status, e.g. `in progress` or `blue wins`.
    pub fn headline(&self) -> String {
        match self.status {
            MatchStatus::InProgress => "in progress".to_string(),
            MatchStatus::GameOver { winner } => format!("{winner} wins"),
        }
    }
}

/// Per-actor numbers ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorPanel {
    pub id: ActorId,
    pub health: u32,
    pub max_health: u32,
    pub health_percent: u32,
    pub energy: u32,
    pub max_energy: u32,
    pub energy_percent: u32,
    /// Whole seconds until the lock lifts, rounded up; `None` when idle.
    pub lock_seconds: Option<u64>,
    pub buffs: Vec<&'static str>,
    /// Cooling skills with whole seconds remaining, rounded up.
    pub cooldowns: Vec<(SkillId, u64)>,
}

impl ActorPanel {
    fn from_view(view: &BattleStateView, id: ActorId) -> Self {
        let actor = view.actor(id);
        Self {
            id,
            health: actor.health.current,
            max_health: actor.health.maximum,
            health_percent: percent(&actor.health),
            energy: actor.energy.current,
            max_energy: actor.energy.maximum,
            energy_percent: percent(&actor.energy),
            lock_seconds: actor
                .lock
                .is_locked()
                .then(|| actor.lock.remaining().as_secs_ceil()),
            buffs: actor.buffs.iter_names().map(|(name, _)| name).collect(),
            cooldowns: actor
                .cooldowns
                .iter()
                .map(|(skill, remaining)| (*skill, remaining.as_secs_ceil()))
                .collect(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.lock_seconds.is_some()
    }
}

fn percent(meter: &ResourceMeter) -> u32 {
    if meter.maximum == 0 {
        return 0;
    }
    let scaled = u64::from(meter.current) * 100 / u64::from(meter.maximum);
    u32::try_from(scaled).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::BattleEngine;

    #[test]
    fn panels_report_percentages_and_countdown() {
        let mut engine = BattleEngine::with_defaults();
        engine
            .cast_skill(ActorId::Red, "fireball", Tick::ZERO)
            .unwrap();
        engine.tick(Tick::from_millis(500));

        let now = Tick::from_millis(1_200);
        let model = BattleViewModel::from_view(&engine.snapshot(now));

        let red = model.actor(ActorId::Red);
        assert_eq!(red.energy_percent, 80);
        assert_eq!(red.lock_seconds, Some(29));
        assert!(red.cooldowns.contains(&(SkillId::Fireball, 2)));

        let blue = model.actor(ActorId::Blue);
        assert_eq!(blue.health_percent, 90);
        assert!(!blue.is_locked());
        assert!(blue.buffs.is_empty());
        assert_eq!(model.headline(), "in progress");
    }
}
