pub mod actor;
pub mod buffs;
pub mod common;

pub use actor::{ActionLock, ActorState, SkillCooldowns};
pub use buffs::{ActiveBuff, ActiveBuffs, BuffFlags, DefenseBuff};
pub use common::{ActorId, Permille, ResourceMeter, Tick};
