//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and engine rejections so clients
//! can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use battle_core::{BuildError, CastError, ErrorSeverity, GameError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("runtime task join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    CastRejected(#[from] CastError),

    #[error("invalid battle configuration")]
    InvalidConfig(#[from] BuildError),

    #[error("advancing time requires a manual clock")]
    ManualClockRequired,
}

impl RuntimeError {
    /// The engine's rejection, if this error is one.
    pub fn as_cast_error(&self) -> Option<&CastError> {
        match self {
            RuntimeError::CastRejected(error) => Some(error),
            _ => None,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::CastRejected(error) => error.severity(),
            RuntimeError::InvalidConfig(error) => error.severity(),
            RuntimeError::ManualClockRequired => ErrorSeverity::Validation,
            RuntimeError::CommandChannelClosed
            | RuntimeError::ReplyChannelClosed(_)
            | RuntimeError::WorkerJoin(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::CastRejected(error) => error.error_code(),
            RuntimeError::InvalidConfig(error) => error.error_code(),
            RuntimeError::ManualClockRequired => "RUNTIME_MANUAL_CLOCK_REQUIRED",
            RuntimeError::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            RuntimeError::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            RuntimeError::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
        }
    }
}
