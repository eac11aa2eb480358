//! Event payloads that originate in the runtime rather than the engine.

use battle_core::{ActorId, CastError, Tick};
use serde::{Deserialize, Serialize};

/// A cast request the engine refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastRejected {
    pub actor: ActorId,
    pub skill: String,
    pub error: CastError,
    pub at: Tick,
}
