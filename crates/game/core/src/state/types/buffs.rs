//! Defensive buffs granted by defense skills.
//!
//! Buffs store `expires_at: Tick` and count as active while
//! `current_tick < expires_at`. Whether an active buff changes how a landed
//! attack resolves depends on [`DefenseRule`](crate::config::DefenseRule).

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::state::Tick;

bitflags::bitflags! {
    /// Compact set of buffs, used in snapshots and events.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BuffFlags: u8 {
        const SHIELD = 0b0000_0001;
        const BARRIER = 0b0000_0010;
        const DODGE = 0b0000_0100;
        const REFLECT = 0b0000_1000;
        const IMMUNITY = 0b0001_0000;
    }
}

/// A single defensive buff kind.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefenseBuff {
    Shield,
    Barrier,
    Dodge,
    Reflect,
    Immunity,
}

impl DefenseBuff {
    pub const fn flag(self) -> BuffFlags {
        match self {
            DefenseBuff::Shield => BuffFlags::SHIELD,
            DefenseBuff::Barrier => BuffFlags::BARRIER,
            DefenseBuff::Dodge => BuffFlags::DODGE,
            DefenseBuff::Reflect => BuffFlags::REFLECT,
            DefenseBuff::Immunity => BuffFlags::IMMUNITY,
        }
    }
}

/// A buff with its expiration time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveBuff {
    pub buff: DefenseBuff,
    pub expires_at: Tick,
}

/// Buffs currently applied to an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveBuffs {
    buffs: ArrayVec<ActiveBuff, { BattleConfig::MAX_BUFFS }>,
}

impl ActiveBuffs {
    pub fn empty() -> Self {
        Self {
            buffs: ArrayVec::new(),
        }
    }

    /// Checks if `buff` is active at the given tick.
    pub fn has(&self, buff: DefenseBuff, current_tick: Tick) -> bool {
        self.buffs
            .iter()
            .any(|b| b.buff == buff && b.expires_at > current_tick)
    }

    /// Gets the expiration tick of a buff, if active.
    pub fn expires_at(&self, buff: DefenseBuff, current_tick: Tick) -> Option<Tick> {
        self.buffs
            .iter()
            .find(|b| b.buff == buff && b.expires_at > current_tick)
            .map(|b| b.expires_at)
    }

    /// Adds a buff. Recasting an active buff extends it to the later expiry.
    pub fn add(&mut self, buff: DefenseBuff, expires_at: Tick) {
        if let Some(existing) = self.buffs.iter_mut().find(|b| b.buff == buff) {
            existing.expires_at = existing.expires_at.max(expires_at);
            return;
        }

        // One slot per kind, so this never overflows.
        if !self.buffs.is_full() {
            self.buffs.push(ActiveBuff { buff, expires_at });
        }
    }

    pub fn remove(&mut self, buff: DefenseBuff) {
        self.buffs.retain(|b| b.buff != buff);
    }

    pub fn clear(&mut self) {
        self.buffs.clear();
    }

    pub fn active_at(&self, current_tick: Tick) -> impl Iterator<Item = &ActiveBuff> + '_ {
        self.buffs
            .iter()
            .filter(move |b| b.expires_at > current_tick)
    }

    /// Active buffs at `current_tick` as a flag set.
    pub fn flags_at(&self, current_tick: Tick) -> BuffFlags {
        self.active_at(current_tick)
            .fold(BuffFlags::empty(), |flags, b| flags | b.buff.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recast_extends_to_later_expiry() {
        let mut buffs = ActiveBuffs::empty();
        buffs.add(DefenseBuff::Shield, Tick(3_000));
        buffs.add(DefenseBuff::Shield, Tick(2_000));
        assert_eq!(buffs.expires_at(DefenseBuff::Shield, Tick(0)), Some(Tick(3_000)));

        buffs.add(DefenseBuff::Shield, Tick(5_000));
        assert_eq!(buffs.expires_at(DefenseBuff::Shield, Tick(0)), Some(Tick(5_000)));
    }

    #[test]
    fn flags_reflect_only_active_buffs() {
        let mut buffs = ActiveBuffs::empty();
        buffs.add(DefenseBuff::Shield, Tick(1_000));
        buffs.add(DefenseBuff::Reflect, Tick(5_000));

        assert_eq!(
            buffs.flags_at(Tick(500)),
            BuffFlags::SHIELD | BuffFlags::REFLECT
        );
        assert_eq!(buffs.flags_at(Tick(1_000)), BuffFlags::REFLECT);

        assert_eq!(buffs.active_at(Tick(5_000)).count(), 0);
    }
}
