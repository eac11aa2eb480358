//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a match.
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use battle_core::{
    BattleConfig, BattleEngine, Clock, ManualClock, MonotonicClock, SkillCatalog, Tick,
};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{SimulationWorker, ticker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Period of the background ticker; `None` leaves ticking to callers.
    pub tick_interval: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            tick_interval: Some(Duration::from_millis(100)),
        }
    }
}

/// Where the simulation worker reads `now` from.
#[derive(Debug, Clone)]
pub enum ClockSource {
    Monotonic(MonotonicClock),
    /// Shared with the caller, who moves it explicitly.
    Manual(ManualClock),
}

impl ClockSource {
    pub fn is_manual(&self) -> bool {
        matches!(self, ClockSource::Manual(_))
    }
}

impl Default for ClockSource {
    fn default() -> Self {
        ClockSource::Monotonic(MonotonicClock::new())
    }
}

impl Clock for ClockSource {
    fn now(&self) -> Tick {
        match self {
            ClockSource::Monotonic(clock) => clock.now(),
            ClockSource::Manual(clock) => clock.now(),
        }
    }
}

impl From<ManualClock> for ClockSource {
    fn from(clock: ManualClock) -> Self {
        ClockSource::Manual(clock)
    }
}

impl From<MonotonicClock> for ClockSource {
    fn from(clock: MonotonicClock) -> Self {
        ClockSource::Monotonic(clock)
    }
}

/// Main runtime that hosts one match.
///
/// Design: Runtime owns workers and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    // Shared handle (can be cloned for clients)
    handle: RuntimeHandle,

    // Background workers
    sim_worker_handle: JoinHandle<()>,
    ticker_handle: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events on one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the simulation worker to drain, so every clone of the handle
    /// must be dropped first.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        if let Some(ticker_handle) = self.ticker_handle {
            ticker_handle.abort();
            match ticker_handle.await {
                Err(error) if !error.is_cancelled() => {
                    return Err(RuntimeError::WorkerJoin(error));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<Arc<SkillCatalog>>,
    clock: ClockSource,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            clock: ClockSource::default(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the battle rules
    pub fn battle_config(mut self, battle: BattleConfig) -> Self {
        self.config.battle = battle;
        self
    }

    /// Skill catalog (defaults to the builtin catalog)
    pub fn catalog(mut self, catalog: impl Into<Arc<SkillCatalog>>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Clock the worker reads `now` from (defaults to a monotonic clock)
    pub fn clock(mut self, clock: impl Into<ClockSource>) -> Self {
        self.clock = clock.into();
        self
    }

    /// Build the runtime and spawn background workers
    pub async fn build(self) -> Result<Runtime> {
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(SkillCatalog::builtin()));
        let engine = BattleEngine::new(self.config.battle.clone(), Arc::clone(&catalog))?;

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        tracing::info!(
            lock_ms = self.config.battle.lock.duration.as_millis(),
            tick_interval = ?self.config.tick_interval,
            "building battle runtime"
        );

        let ticker_handle = self
            .config
            .tick_interval
            .filter(|period| !period.is_zero())
            .map(|period| tokio::spawn(ticker::run(command_tx.downgrade(), period)));

        let worker = SimulationWorker::new(engine, self.clock, command_rx, event_bus.clone());
        let sim_worker_handle = tokio::spawn(worker.run());

        let handle = RuntimeHandle::new(command_tx, event_bus, catalog);

        Ok(Runtime {
            handle,
            sim_worker_handle,
            ticker_handle,
        })
    }
}
