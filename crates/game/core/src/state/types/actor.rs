//! Per-actor battle state: resources, the shared action lock, per-skill
//! cooldowns and defensive buffs.

use std::collections::BTreeMap;

use super::buffs::ActiveBuffs;
use super::common::{ActorId, Permille, ResourceMeter, Tick};
use crate::skill::SkillId;

/// Shared per-actor action lock.
///
/// `Idle -> Locked { until } -> Idle`. The only way in is a successful cast;
/// the only way out is the clock reaching `until` (which the rebate rule may
/// pull forward once).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionLock {
    #[default]
    Idle,
    Locked {
        started_at: Tick,
        until: Tick,
        rebated: bool,
    },
}

impl ActionLock {
    /// Engages the lock from `now` for `duration`.
    pub fn engage(now: Tick, duration: Tick) -> Self {
        ActionLock::Locked {
            started_at: now,
            until: now + duration,
            rebated: false,
        }
    }

    /// True while the lock blocks new casts at `now`.
    pub fn is_locked(&self, now: Tick) -> bool {
        match self {
            ActionLock::Idle => false,
            ActionLock::Locked { until, .. } => now < *until,
        }
    }

    /// Deadline of the current lock, if one is engaged.
    pub fn until(&self) -> Option<Tick> {
        match self {
            ActionLock::Idle => None,
            ActionLock::Locked { until, .. } => Some(*until),
        }
    }

    /// Time left before the lock releases at `now` (zero when idle).
    pub fn remaining(&self, now: Tick) -> Tick {
        self.until()
            .map(|until| until.saturating_sub(now))
            .unwrap_or(Tick::ZERO)
    }
}

/// Per-skill "ready at" deadlines recorded on every successful cast.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillCooldowns {
    ready_at: BTreeMap<SkillId, Tick>,
}

impl SkillCooldowns {
    pub fn start(&mut self, skill: SkillId, now: Tick, cooldown: Tick) {
        self.ready_at.insert(skill, now + cooldown);
    }

    /// Remaining cooldown for `skill`; absence means ready.
    pub fn remaining(&self, skill: SkillId, now: Tick) -> Tick {
        self.ready_at
            .get(&skill)
            .map(|ready| ready.saturating_sub(now))
            .unwrap_or(Tick::ZERO)
    }

    pub fn is_ready(&self, skill: SkillId, now: Tick) -> bool {
        self.remaining(skill, now) == Tick::ZERO
    }

    pub fn ready_at(&self, skill: SkillId) -> Option<Tick> {
        self.ready_at.get(&skill).copied()
    }

    /// Skills still cooling at `now` with their remaining time, in id order.
    pub fn cooling_at(&self, now: Tick) -> impl Iterator<Item = (SkillId, Tick)> + '_ {
        self.ready_at
            .iter()
            .filter(move |(_, ready)| **ready > now)
            .map(move |(skill, ready)| (*skill, ready.saturating_sub(now)))
    }

    pub fn clear(&mut self) {
        self.ready_at.clear();
    }
}

/// Complete state of one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: ActorId,
    pub health: ResourceMeter,
    pub energy: ResourceMeter,
    pub lock: ActionLock,
    pub cooldowns: SkillCooldowns,
    pub buffs: ActiveBuffs,
    /// Thousandths of a health point owed by earlier hits.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_carry: u32,
}

impl ActorState {
    /// A fresh actor at full health and energy.
    pub fn new(id: ActorId, max_health: u32, max_energy: u32) -> Self {
        Self {
            id,
            health: ResourceMeter::full(max_health),
            energy: ResourceMeter::full(max_energy),
            lock: ActionLock::Idle,
            cooldowns: SkillCooldowns::default(),
            buffs: ActiveBuffs::empty(),
            damage_carry: 0,
        }
    }

    /// Drains `ratio` of max health and returns the health actually lost.
    ///
    /// The fractional remainder carries into the next hit, so `n` hits of
    /// `ratio` remove exactly `floor(n * ratio * maximum)` in total.
    pub fn take_hit(&mut self, ratio: Permille) -> u32 {
        let owed = u64::from(self.health.maximum) * u64::from(ratio.0)
            + u64::from(self.damage_carry);
        self.damage_carry = (owed % 1_000) as u32;
        let whole = u32::try_from(owed / 1_000).unwrap_or(u32::MAX);
        self.health.drain(whole)
    }

    /// Restores the actor to its start-of-match condition.
    pub fn restore(&mut self) {
        self.health.fill();
        self.energy.fill();
        self.lock = ActionLock::Idle;
        self.cooldowns.clear();
        self.buffs.clear();
        self.damage_carry = 0;
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_releases_exactly_at_deadline() {
        let lock = ActionLock::engage(Tick::from_secs(1), Tick::from_secs(30));
        assert!(lock.is_locked(Tick::from_secs(1)));
        assert!(lock.is_locked(Tick::from_millis(30_999)));
        assert!(!lock.is_locked(Tick::from_secs(31)));
        assert_eq!(lock.remaining(Tick::from_secs(21)), Tick::from_secs(10));
        assert_eq!(ActionLock::Idle.remaining(Tick::from_secs(5)), Tick::ZERO);
    }

    #[test]
    fn cooldowns_report_remaining_and_ready() {
        let mut cooldowns = SkillCooldowns::default();
        cooldowns.start(SkillId::Fireball, Tick::ZERO, Tick::from_secs(3));

        assert_eq!(
            cooldowns.remaining(SkillId::Fireball, Tick::from_secs(1)),
            Tick::from_secs(2)
        );
        assert!(cooldowns.is_ready(SkillId::Lightning, Tick::ZERO));
        assert!(cooldowns.is_ready(SkillId::Fireball, Tick::from_secs(3)));
        assert_eq!(cooldowns.cooling_at(Tick::from_secs(1)).count(), 1);
    }

    #[test]
    fn ten_tenth_hits_empty_any_maximum() {
        for maximum in [1, 7, 94, 100, 101, 999] {
            let mut actor = ActorState::new(ActorId::Blue, maximum, 100);
            for _ in 0..9 {
                actor.take_hit(Permille(100));
            }
            assert!(!actor.is_defeated(), "max {maximum} fell before the tenth hit");
            actor.take_hit(Permille(100));
            assert!(actor.is_defeated(), "max {maximum} survived ten hits");
        }
    }

    #[test]
    fn restore_returns_to_full_and_idle() {
        let mut actor = ActorState::new(ActorId::Red, 100, 100);
        actor.health.drain(70);
        actor.energy.drain(45);
        actor.lock = ActionLock::engage(Tick::ZERO, Tick::from_secs(30));
        actor
            .cooldowns
            .start(SkillId::Meteor, Tick::ZERO, Tick::from_secs(8));

        actor.restore();

        assert!(actor.health.is_full());
        assert!(actor.energy.is_full());
        assert_eq!(actor.lock, ActionLock::Idle);
        assert!(actor.cooldowns.is_ready(SkillId::Meteor, Tick::ZERO));
    }
}
