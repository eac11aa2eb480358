//! Battle State Engine.
//!
//! [`BattleEngine`] is the authoritative reducer for [`BattleState`]. Casts
//! are admitted synchronously (gate check, energy debit and lock update
//! happen together), and every delayed consequence is an entry in a
//! deterministic [`Scheduler`] that [`BattleEngine::tick`] drains in time
//! order. Nothing here reads a wall clock; callers pass `now` explicitly.

mod errors;
mod gate;
mod resolve;
mod schedule;

pub use errors::{BuildError, CastError};
pub use schedule::{Fired, Scheduler, TimerId};

use std::sync::Arc;

use tracing::{debug, info, warn};

use self::resolve::Scheduled;
use crate::config::BattleConfig;
use crate::event::{AppliedEffect, BattleEvent, BattleObserver, ObserverId, Observers};
use crate::skill::{Skill, SkillCatalog, SkillId};
use crate::snapshot::BattleStateView;
use crate::state::{ActorId, BattleState, Tick};

/// Owns one match: both actors, the timeline and the observers.
#[derive(Debug)]
pub struct BattleEngine {
    config: BattleConfig,
    catalog: Arc<SkillCatalog>,
    state: BattleState,
    scheduler: Scheduler<Scheduled>,
    lock_timers: [Option<TimerId>; 2],
    observers: Observers,
    now: Tick,
}

impl BattleEngine {
    /// Creates an engine at time zero with both actors at full resources.
    ///
    /// Fails if the config is invalid or a catalog skill costs more energy
    /// than an actor can hold.
    pub fn new(config: BattleConfig, catalog: Arc<SkillCatalog>) -> Result<Self, BuildError> {
        config.validate()?;
        catalog.validate_costs(config.max_energy)?;

        let mut engine = Self {
            state: BattleState::new(config.max_health, config.max_energy),
            config,
            catalog,
            scheduler: Scheduler::new(),
            lock_timers: [None; 2],
            observers: Observers::default(),
            now: Tick::ZERO,
        };
        engine.arm_regen();
        Ok(engine)
    }

    /// Engine with the default config and the builtin catalog.
    pub fn with_defaults() -> Self {
        Self::new(BattleConfig::default(), Arc::new(SkillCatalog::builtin()))
            .unwrap_or_else(|_| unreachable!("default config fits builtin catalog"))
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<SkillCatalog> {
        &self.catalog
    }

    /// Last time the timeline was advanced to.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Number of scheduled entries still waiting to fire.
    pub fn pending(&self) -> usize {
        self.scheduler.len()
    }

    /// Due time of the next scheduled entry.
    pub fn next_due(&self) -> Option<Tick> {
        self.scheduler.next_due()
    }

    /// Attempts a cast by string skill key.
    ///
    /// Advances the timeline to `now` first, then checks in order: match
    /// over, unknown skill, energy, per-skill cooldown (when enabled), lock.
    pub fn cast_skill(
        &mut self,
        caster: ActorId,
        skill: &str,
        now: Tick,
    ) -> Result<AppliedEffect, CastError> {
        let now = self.advance(now);
        gate::ensure_in_progress(&self.state)?;

        let catalog = Arc::clone(&self.catalog);
        let entry = catalog
            .get(skill)
            .map_err(|_| CastError::UnknownSkill(skill.to_string()))?;
        self.commit(caster, entry, now)
    }

    /// Attempts a cast by typed skill id.
    pub fn cast(
        &mut self,
        caster: ActorId,
        skill: SkillId,
        now: Tick,
    ) -> Result<AppliedEffect, CastError> {
        let now = self.advance(now);
        gate::ensure_in_progress(&self.state)?;

        let catalog = Arc::clone(&self.catalog);
        let entry = catalog
            .skill(skill)
            .ok_or_else(|| CastError::UnknownSkill(skill.to_string()))?;
        self.commit(caster, entry, now)
    }

    /// Fires every scheduled entry due at or before `now`, returning how many
    /// fired. Entries scheduled by a firing are picked up in the same call.
    pub fn tick(&mut self, now: Tick) -> usize {
        let now = self.clamp(now);
        self.drain_until(now)
    }

    /// Starts a fresh match: full resources, no locks, buffs or cooldowns,
    /// and no pending timers. Observers stay subscribed.
    pub fn reset(&mut self) {
        let dropped = self.scheduler.cancel_all();
        self.lock_timers = [None; 2];
        self.state.restore();
        self.arm_regen();

        info!(at = %self.now, dropped, "match reset");
        self.emit(BattleEvent::MatchReset { at: self.now });
    }

    /// Read-only view of the match at `now`.
    ///
    /// Does not fire due entries; call [`BattleEngine::tick`] first for an
    /// up-to-date view.
    pub fn snapshot(&self, now: Tick) -> BattleStateView {
        BattleStateView::capture(&self.state, now.max(self.now), self.scheduler.len())
    }

    pub fn subscribe(&mut self, observer: impl BattleObserver + 'static) -> ObserverId {
        self.observers.add(Box::new(observer))
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn commit(
        &mut self,
        caster: ActorId,
        skill: &Skill,
        now: Tick,
    ) -> Result<AppliedEffect, CastError> {
        gate::admit(&self.state, &self.config, caster, skill, now)?;

        let actor = self.state.actor_mut(caster);
        let energy_spent = actor.energy.drain(skill.energy_cost);
        let energy_after = actor.energy.current;
        actor.cooldowns.start(skill.id, now, skill.cooldown);

        let lock_until = self.engage_lock(caster, now);

        let target = if skill.category.targets_opponent() {
            caster.opponent()
        } else {
            caster
        };
        let applied = AppliedEffect {
            caster,
            target,
            skill: skill.id,
            category: skill.category,
            effect: skill.effect,
            cast_at: now,
            lands_at: now + skill.effect.lands_after(),
            energy_spent,
            energy_after,
            lock_until,
        };

        debug!(%caster, skill = %skill.id, energy_after, lock_until = %lock_until, "cast committed");
        self.emit(BattleEvent::SkillCast {
            at: now,
            effect: applied.clone(),
        });
        self.plan(&applied);

        Ok(applied)
    }

    fn advance(&mut self, now: Tick) -> Tick {
        let now = self.clamp(now);
        self.drain_until(now);
        now
    }

    fn clamp(&self, now: Tick) -> Tick {
        if now < self.now {
            warn!(requested = %now, last = %self.now, "clock went backwards; clamping");
            return self.now;
        }
        now
    }

    fn drain_until(&mut self, now: Tick) -> usize {
        let mut fired = 0;
        while let Some(entry) = self.scheduler.pop_due(now) {
            self.now = entry.due;
            self.resolve(entry);
            fired += 1;
        }
        self.now = now;
        fired
    }

    fn arm_regen(&mut self) {
        if let Some(regen) = self.config.energy_regen {
            self.scheduler.schedule_repeating(
                self.now + regen.interval,
                regen.interval,
                None,
                Scheduled::EnergyRegen {
                    amount: regen.amount,
                },
            );
        }
    }

    fn emit(&mut self, event: BattleEvent) {
        self.observers.notify(&event);
    }
}
