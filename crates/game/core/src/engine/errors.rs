//! Errors surfaced when a cast is rejected.

use crate::config::ConfigError;
use crate::error::{ErrorSeverity, GameError};
use crate::skill::{CatalogError, SkillId};
use crate::state::{ActorId, Tick};

/// Why a cast request was refused. A rejected cast changes no state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastError {
    #[error("unknown skill '{0}'")]
    UnknownSkill(String),

    #[error("{actor} needs {required} energy but has {available}")]
    InsufficientEnergy {
        actor: ActorId,
        required: u32,
        available: u32,
    },

    #[error("{actor} is locked until {until}")]
    ActorLocked { actor: ActorId, until: Tick },

    #[error("{skill} is cooling down for {actor} until {until}")]
    SkillCoolingDown {
        actor: ActorId,
        skill: SkillId,
        until: Tick,
    },

    #[error("match is over, {winner} won")]
    MatchOver { winner: ActorId },
}

impl CastError {
    /// Time after which the same request could succeed, for timing rejections.
    pub fn retry_at(&self) -> Option<Tick> {
        match self {
            CastError::ActorLocked { until, .. } | CastError::SkillCoolingDown { until, .. } => {
                Some(*until)
            }
            _ => None,
        }
    }
}

impl GameError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CastError::InsufficientEnergy { .. }
            | CastError::ActorLocked { .. }
            | CastError::SkillCoolingDown { .. } => ErrorSeverity::Recoverable,
            CastError::UnknownSkill(_) | CastError::MatchOver { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CastError::UnknownSkill(_) => "CAST_UNKNOWN_SKILL",
            CastError::InsufficientEnergy { .. } => "CAST_INSUFFICIENT_ENERGY",
            CastError::ActorLocked { .. } => "CAST_ACTOR_LOCKED",
            CastError::SkillCoolingDown { .. } => "CAST_SKILL_COOLING_DOWN",
            CastError::MatchOver { .. } => "CAST_MATCH_OVER",
        }
    }
}

/// Why an engine could not be created from a config and catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("invalid battle config: {0}")]
    Config(#[from] ConfigError),

    #[error("catalog does not fit config: {0}")]
    Catalog(#[from] CatalogError),
}

impl GameError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            BuildError::Config(inner) => inner.error_code(),
            BuildError::Catalog(inner) => inner.error_code(),
        }
    }
}
