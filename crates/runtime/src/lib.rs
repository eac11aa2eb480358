//! Async host for a real-time skill battle.
//!
//! This crate wraps the synchronous [`battle_core::BattleEngine`] in a tokio
//! worker, drives its timeline from a clock, and fans engine events out on a
//! topic bus. Consumers embed [`Runtime`] and interact with the match through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{CastRejected, Event, EventBus, Topic};
pub use runtime::{ClockSource, Runtime, RuntimeBuilder, RuntimeConfig};
