//! Effect planning at cast time and resolution of scheduled entries.
//!
//! Every delayed state change is a [`Scheduled`] entry in the engine's
//! scheduler. Handlers run with the entry's due time as the current time,
//! so resolution order and timestamps never depend on how coarse the
//! caller's ticks are.

use tracing::{debug, info};

use super::BattleEngine;
use super::schedule::Fired;
use crate::config::DefenseRule;
use crate::event::{AppliedEffect, BattleEvent, EnergySource};
use crate::skill::{SkillEffect, SkillId};
use crate::state::{ActionLock, ActorId, BuffFlags, DefenseBuff, Permille, Tick};

/// Buffs that negate a landed hit, strongest first.
const NEGATING: [DefenseBuff; 4] = [
    DefenseBuff::Immunity,
    DefenseBuff::Barrier,
    DefenseBuff::Shield,
    DefenseBuff::Dodge,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Scheduled {
    LandAttack {
        caster: ActorId,
        target: ActorId,
        skill: SkillId,
        amount: Permille,
    },
    Heal {
        actor: ActorId,
        skill: SkillId,
        amount: Permille,
    },
    HealPulse {
        actor: ActorId,
        skill: SkillId,
        per_pulse: Permille,
    },
    RestoreEnergy {
        actor: ActorId,
        skill: SkillId,
        amount: Permille,
    },
    Revive {
        actor: ActorId,
    },
    Cleanse {
        actor: ActorId,
    },
    ExpireBuff {
        actor: ActorId,
        buff: DefenseBuff,
    },
    LockRebate {
        actor: ActorId,
        started_at: Tick,
    },
    LockRelease {
        actor: ActorId,
    },
    EnergyRegen {
        amount: u32,
    },
}

impl BattleEngine {
    /// Engages the caster's lock and arms its release and rebate timers.
    pub(super) fn engage_lock(&mut self, actor: ActorId, now: Tick) -> Tick {
        let preset = self.config.lock;
        let lock = ActionLock::engage(now, preset.duration);
        self.state.actor_mut(actor).lock = lock;

        let until = now + preset.duration;
        self.arm_release(actor, until);

        if let Some(rebate) = preset.rebate {
            self.scheduler.schedule_once(
                now + rebate.at,
                Scheduled::LockRebate {
                    actor,
                    started_at: now,
                },
            );
        }

        until
    }

    fn arm_release(&mut self, actor: ActorId, until: Tick) {
        if let Some(previous) = self.lock_timers[actor.index()].take() {
            self.scheduler.cancel(previous);
        }
        let timer = self
            .scheduler
            .schedule_once(until, Scheduled::LockRelease { actor });
        self.lock_timers[actor.index()] = Some(timer);
    }

    /// Schedules the state change a successful cast committed to.
    ///
    /// Guards apply immediately; everything else lands later.
    pub(super) fn plan(&mut self, applied: &AppliedEffect) {
        let caster = applied.caster;
        let skill = applied.skill;
        let lands_at = applied.lands_at;

        let action = match applied.effect {
            SkillEffect::Damage { amount, .. } => Scheduled::LandAttack {
                caster,
                target: applied.target,
                skill,
                amount,
            },
            SkillEffect::Guard { buff, duration } => {
                self.apply_guard(caster, buff, applied.cast_at, duration);
                return;
            }
            SkillEffect::Heal { amount, .. } => Scheduled::Heal {
                actor: caster,
                skill,
                amount,
            },
            SkillEffect::HealOverTime {
                per_pulse,
                pulses,
                interval,
            } => {
                self.scheduler.schedule_repeating(
                    lands_at,
                    interval,
                    Some(u32::from(pulses)),
                    Scheduled::HealPulse {
                        actor: caster,
                        skill,
                        per_pulse,
                    },
                );
                debug!(%caster, %skill, pulses, first = %lands_at, "scheduled heal over time");
                return;
            }
            SkillEffect::RestoreEnergy { amount, .. } => Scheduled::RestoreEnergy {
                actor: caster,
                skill,
                amount,
            },
            SkillEffect::Revive { .. } => Scheduled::Revive { actor: caster },
            SkillEffect::Cleanse { .. } => Scheduled::Cleanse { actor: caster },
        };

        debug!(%caster, %skill, due = %lands_at, "scheduled effect");
        self.scheduler.schedule_once(lands_at, action);
    }

    fn apply_guard(&mut self, actor: ActorId, buff: DefenseBuff, now: Tick, duration: Tick) {
        let buffs = &mut self.state.actor_mut(actor).buffs;
        buffs.add(buff, now + duration);
        let expires_at = buffs.expires_at(buff, now).unwrap_or(now + duration);

        self.scheduler
            .schedule_once(now + duration, Scheduled::ExpireBuff { actor, buff });
        self.emit(BattleEvent::BuffApplied {
            at: now,
            actor,
            buff,
            expires_at,
        });
    }

    /// Applies one fired entry at its due time.
    pub(super) fn resolve(&mut self, fired: Fired<Scheduled>) {
        let at = fired.due;

        match fired.action {
            Scheduled::LandAttack {
                caster,
                target,
                skill,
                amount,
            } => {
                self.land_attack(at, caster, target, skill, amount);
                self.settle(at);
            }
            Scheduled::Heal {
                actor,
                skill,
                amount,
            } => {
                self.heal(at, actor, skill, amount, None);
            }
            Scheduled::HealPulse {
                actor,
                skill,
                per_pulse,
            } => {
                let pulse = fired.total.map(|total| (fired.firing, total));
                self.heal(at, actor, skill, per_pulse, pulse);
            }
            Scheduled::RestoreEnergy {
                actor,
                skill,
                amount,
            } => {
                let energy = &mut self.state.actor_mut(actor).energy;
                let restored = energy.apply_permille(amount);
                let energy_after = energy.current;
                self.emit(BattleEvent::EnergyRestored {
                    at,
                    actor,
                    source: EnergySource::Skill(skill),
                    amount: restored,
                    energy_after,
                });
            }
            Scheduled::Revive { actor } => {
                let health = &mut self.state.actor_mut(actor).health;
                health.fill();
                let health_after = health.current;
                self.emit(BattleEvent::Revived {
                    at,
                    actor,
                    health_after,
                });
            }
            Scheduled::Cleanse { actor } => {
                self.emit(BattleEvent::Cleansed { at, actor });
            }
            Scheduled::ExpireBuff { actor, buff } => {
                let buffs = &mut self.state.actor_mut(actor).buffs;
                // A recast may have pushed the expiry past this entry.
                if !buffs.has(buff, at) {
                    buffs.remove(buff);
                    self.emit(BattleEvent::BuffExpired { at, actor, buff });
                }
            }
            Scheduled::LockRebate { actor, started_at } => {
                self.rebate_lock(at, actor, started_at);
            }
            Scheduled::LockRelease { actor } => {
                let lock = &mut self.state.actor_mut(actor).lock;
                if lock.until().is_some_and(|until| until <= at) {
                    *lock = ActionLock::Idle;
                    self.lock_timers[actor.index()] = None;
                    self.emit(BattleEvent::LockReleased { at, actor });
                }
            }
            Scheduled::EnergyRegen { amount } => {
                for actor in ActorId::ALL {
                    let energy = &mut self.state.actor_mut(actor).energy;
                    let restored = energy.restore(amount);
                    let energy_after = energy.current;
                    if restored > 0 {
                        self.emit(BattleEvent::EnergyRestored {
                            at,
                            actor,
                            source: EnergySource::Regeneration,
                            amount: restored,
                            energy_after,
                        });
                    }
                }
            }
        }
    }

    fn land_attack(
        &mut self,
        at: Tick,
        caster: ActorId,
        target: ActorId,
        skill: SkillId,
        amount: Permille,
    ) {
        if self.config.defense == DefenseRule::Mitigating {
            let flags = self.state.actor(target).buffs.flags_at(at);

            if flags.contains(BuffFlags::REFLECT) {
                let source = self.state.actor_mut(caster);
                let dealt = source.take_hit(amount);
                let source_health_after = source.health.current;
                self.emit(BattleEvent::AttackReflected {
                    at,
                    source: caster,
                    target,
                    skill,
                    amount: dealt,
                    source_health_after,
                });
                return;
            }

            if let Some(buff) = NEGATING.into_iter().find(|b| flags.contains(b.flag())) {
                self.emit(BattleEvent::AttackNegated {
                    at,
                    source: caster,
                    target,
                    skill,
                    buff,
                });
                return;
            }
        }

        let victim = self.state.actor_mut(target);
        let dealt = victim.take_hit(amount);
        let health_after = victim.health.current;
        self.emit(BattleEvent::DamageLanded {
            at,
            source: caster,
            target,
            skill,
            amount: dealt,
            health_after,
        });
    }

    fn heal(
        &mut self,
        at: Tick,
        actor: ActorId,
        skill: SkillId,
        amount: Permille,
        pulse: Option<(u32, u32)>,
    ) {
        let health = &mut self.state.actor_mut(actor).health;
        let healed = health.apply_permille(amount);
        let health_after = health.current;
        self.emit(BattleEvent::Healed {
            at,
            actor,
            skill,
            amount: healed,
            health_after,
            pulse,
        });
    }

    /// Pulls the lock end forward if this rebate still belongs to the lock
    /// that armed it.
    fn rebate_lock(&mut self, at: Tick, actor: ActorId, armed_by: Tick) {
        let Some(rebate) = self.config.lock.rebate else {
            return;
        };

        let lock = &mut self.state.actor_mut(actor).lock;
        let ActionLock::Locked {
            started_at,
            until,
            rebated: false,
        } = *lock
        else {
            return;
        };

        let shortened = started_at + rebate.shorten_to;
        if started_at != armed_by || at >= until || shortened >= until {
            return;
        }

        *lock = ActionLock::Locked {
            started_at,
            until: shortened,
            rebated: true,
        };
        self.arm_release(actor, shortened);

        debug!(%actor, until = %shortened, "lock rebated");
        self.emit(BattleEvent::LockRebated {
            at,
            actor,
            until: shortened,
        });
    }

    /// Latches game over after a health change and drops every pending timer.
    fn settle(&mut self, at: Tick) {
        let Some(winner) = self.state.latch_game_over() else {
            return;
        };

        let dropped = self.scheduler.cancel_all();
        self.lock_timers = [None; 2];

        info!(%winner, at = %at, dropped, "game over");
        self.emit(BattleEvent::GameOver { at, winner });
    }
}
