//! Periodic tick source for the simulation worker.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use super::Command;

/// Sends [`Command::Tick`] every `period` until the worker's channel closes.
///
/// Holds only a weak sender, so dropping every [`RuntimeHandle`] still lets
/// the worker stop.
///
/// [`RuntimeHandle`]: crate::RuntimeHandle
pub(crate) async fn run(command_tx: mpsc::WeakSender<Command>, period: Duration) {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        let Some(tx) = command_tx.upgrade() else {
            break;
        };
        match tx.try_send(Command::Tick { reply: None }) {
            // A backed-up queue will tick on its own once drained.
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Closed(_)) => break,
        }
    }

    debug!("ticker stopped");
}
