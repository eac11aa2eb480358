//! Simulation worker that owns the authoritative [`BattleEngine`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), reads the
//! clock, drives the engine and publishes every engine event on the bus.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace, warn};

use battle_core::{
    ActorId, AppliedEffect, BattleEngine, BattleEvent, BattleStateView, CastError, Clock,
    GameError, Tick,
};

use crate::api::{Result, RuntimeError};
use crate::events::{CastRejected, Event, EventBus};
use crate::runtime::ClockSource;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Cast a skill by catalog key at the current clock reading.
    Cast {
        actor: ActorId,
        skill: String,
        reply: oneshot::Sender<std::result::Result<AppliedEffect, CastError>>,
    },
    /// Fire every scheduled effect due by the current clock reading.
    /// The ticker sends these without a reply channel.
    Tick {
        reply: Option<oneshot::Sender<usize>>,
    },
    /// Move a manual clock to `now`, then tick.
    Advance {
        now: Tick,
        reply: oneshot::Sender<Result<usize>>,
    },
    /// Start a fresh match.
    Reset { reply: oneshot::Sender<()> },
    /// Tick, then capture a read-only view of the match.
    Snapshot {
        reply: oneshot::Sender<BattleStateView>,
    },
}

/// Background task that processes battle commands.
pub struct SimulationWorker {
    engine: BattleEngine,
    clock: ClockSource,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    /// Creates a new simulation worker and routes engine events to the bus.
    pub fn new(
        mut engine: BattleEngine,
        clock: ClockSource,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let bus = event_bus.clone();
        engine.subscribe(move |event: &BattleEvent| {
            bus.publish(Event::from_battle(event.clone()));
        });

        Self {
            engine,
            clock,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends once every command sender is gone.
    pub async fn run(mut self) {
        info!(
            skills = self.engine.catalog().len(),
            manual_clock = self.clock.is_manual(),
            "simulation worker started"
        );

        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }

        debug!(at = %self.engine.now(), "simulation worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Cast {
                actor,
                skill,
                reply,
            } => {
                let result = self.cast(actor, skill);
                if reply.send(result).is_err() {
                    debug!("cast caller dropped before reply");
                }
            }
            Command::Tick { reply } => {
                let fired = self.tick();
                if let Some(reply) = reply {
                    let _ = reply.send(fired);
                }
            }
            Command::Advance { now, reply } => {
                let result = self.advance(now);
                let _ = reply.send(result);
            }
            Command::Reset { reply } => {
                self.engine.reset();
                let _ = reply.send(());
            }
            Command::Snapshot { reply } => {
                let now = self.clock.now();
                self.engine.tick(now);
                let _ = reply.send(self.engine.snapshot(now));
            }
        }
    }

    fn cast(
        &mut self,
        actor: ActorId,
        skill: String,
    ) -> std::result::Result<AppliedEffect, CastError> {
        let now = self.clock.now();
        match self.engine.cast_skill(actor, &skill, now) {
            Ok(applied) => Ok(applied),
            Err(error) => {
                warn!(
                    %actor,
                    %skill,
                    %error,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    "cast rejected"
                );
                let at = self.engine.now();
                self.event_bus.publish(Event::CastRejected(CastRejected {
                    actor,
                    skill,
                    error: error.clone(),
                    at,
                }));
                Err(error)
            }
        }
    }

    fn tick(&mut self) -> usize {
        let fired = self.engine.tick(self.clock.now());
        if fired > 0 {
            trace!(fired, at = %self.engine.now(), "scheduled effects fired");
        }
        fired
    }

    fn advance(&mut self, now: Tick) -> Result<usize> {
        let ClockSource::Manual(clock) = &self.clock else {
            return Err(RuntimeError::ManualClockRequired);
        };
        clock.set(now);
        Ok(self.tick())
    }
}
